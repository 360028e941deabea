//! Streaming readers and writers for the DIMACS CNF and DRAT file formats.
//!
//! Inputs are read in bounded chunks from a [`Source`][io::Source], so arbitrarily large and
//! compressed files can be processed with constant memory overhead. Parsing results do not depend
//! on how the input is split into chunks.
//!
//! DIMACS CNF files are read using [`dimacs::cnf::parse_cnf`] and friends, DRAT proofs in text or
//! binary format using [`drat::parse_drat`] and friends. Proofs are written using the writers in
//! [`proof::drat`].
#![warn(missing_docs)]

pub mod config;
pub mod dimacs;
pub mod drat;
pub mod error;
pub mod io;
pub mod lit;
pub mod log;
pub mod proof;
pub mod scan;
pub mod text;
