//! Chunked parser for the bodies of DIMACS CNF files and text DRAT proofs.
use bstr::BStr;

use crate::{
    dimacs::Header,
    drat::ProofStep,
    error::ParseError,
    lit::{Lit, SignedLitIdx},
    scan::{find_line_end, is_space, scan_int, skip_comments, token_end, CommentScan, IntToken},
};

/// Which text format a [`TextChunkParser`] accepts.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Mode {
    /// Body of a DIMACS CNF file: clauses only.
    Cnf,
    /// Text DRAT proof: clauses, optionally preceded by a `d` deletion marker.
    Drat,
}

/// Resumable parser for a text body delivered in chunks.
///
/// Each call to [`parse`][Self::parse] processes a chunk and returns how far it got. Comments and
/// deletion markers may span calls, as the parser remembers being inside a comment or after a `d`.
/// Integer tokens may not: a token that cannot be completed within a chunk is left unconsumed and
/// must be passed again at the start of the next chunk.
///
/// A digit run that reaches the end of a chunk is taken as complete, so chunks must not end within
/// a token unless the input ends there. [`ChunkReader`][crate::io::chunk::ChunkReader] produces
/// chunks with this property.
pub struct TextChunkParser {
    mode: Mode,
    clause: Vec<Lit>,
    in_comment: bool,
    in_deletion: bool,
    clause_count: usize,
    offset: u64,
}

impl TextChunkParser {
    /// Creates a parser at the start of a body.
    pub fn new(mode: Mode) -> Self {
        TextChunkParser {
            mode,
            clause: vec![],
            in_comment: false,
            in_deletion: false,
            clause_count: 0,
            offset: 0,
        }
    }

    /// The format accepted by this parser.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Number of terminated clauses.
    pub fn clause_count(&self) -> usize {
        self.clause_count
    }

    /// Offset of the next unconsumed byte in the input stream.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Accounts for `len` bytes of input that were consumed outside of this parser.
    ///
    /// Only affects the offsets reported in errors.
    pub fn advance_offset(&mut self, len: usize) {
        self.offset += len as u64;
    }

    /// Parses the clauses in `chunk[start..]`.
    ///
    /// `on_step` is called for every terminated clause. Returns the position in `chunk` of the first
    /// byte that was not consumed. Unconsumed bytes are a token that continues in the next chunk,
    /// a `-` or a trailing `d` deletion marker.
    pub fn parse<E: From<ParseError>>(
        &mut self,
        chunk: &[u8],
        start: usize,
        mut on_step: impl FnMut(ProofStep) -> Result<(), E>,
    ) -> Result<usize, E> {
        let mut pos = start;

        if self.in_comment {
            match find_line_end(chunk, pos) {
                Some(line_end) => {
                    self.in_comment = false;
                    pos = line_end + 1;
                }
                None => {
                    self.offset += (chunk.len() - start) as u64;
                    return Ok(chunk.len());
                }
            }
        }

        loop {
            let (next, scan) = skip_comments(chunk, pos);
            pos = next;
            if scan == CommentScan::InComment {
                self.in_comment = true;
                break;
            }
            let byte = match chunk.get(pos) {
                Some(&byte) => byte,
                None => break,
            };

            if byte == b'd' && self.mode == Mode::Drat {
                if !self.clause.is_empty() {
                    return Err(self.error(start, pos, "deletion marker within a clause").into());
                }
                if self.in_deletion {
                    return Err(self.error(start, pos, "repeated deletion marker").into());
                }
                match chunk.get(pos + 1) {
                    None => break,
                    Some(&next) if !is_space(next) => {
                        return Err(self
                            .error(start, pos + 1, "expected whitespace after deletion marker")
                            .into());
                    }
                    Some(_) => {
                        self.in_deletion = true;
                        pos += 1;
                        continue;
                    }
                }
            }

            let (value, end) = match scan_int(chunk, pos) {
                IntToken::Value(value, end) => (value, end),
                IntToken::Incomplete => break,
                IntToken::Invalid(_) => {
                    let token = <&BStr>::from(&chunk[pos..token_end(chunk, pos)]);
                    let message = format!("unexpected {:?}, expected a literal", token);
                    return Err(self.error(start, pos, message).into());
                }
            };

            if value == Some(0) {
                let step = ProofStep {
                    is_addition: self.mode == Mode::Cnf || !self.in_deletion,
                    lits: &self.clause,
                };
                on_step(step)?;
                self.clause.clear();
                self.in_deletion = false;
                self.clause_count += 1;
            } else {
                let lit = value
                    .and_then(|value| SignedLitIdx::try_from(value).ok())
                    .and_then(|value| Lit::from_dimacs(value).ok());
                match lit {
                    Some(lit) => self.clause.push(lit),
                    None => {
                        let token = <&BStr>::from(&chunk[pos..end]);
                        let message = format!("literal {} out of range", token);
                        return Err(self.error(start, pos, message).into());
                    }
                }
            }
            pos = end;
        }

        self.offset += (pos - start) as u64;
        Ok(pos)
    }

    /// Checks the end of a DIMACS CNF body against its header.
    pub fn finish_cnf(&self, header: &Header) -> Result<(), ParseError> {
        self.check_closed()?;
        if self.clause_count != header.clause_count {
            return Err(ParseError::syntax(
                self.offset,
                format!(
                    "header specifies {} clauses, found {}",
                    header.clause_count, self.clause_count
                ),
            ));
        }
        Ok(())
    }

    /// Checks the end of a text DRAT proof.
    pub fn finish_drat(&self) -> Result<(), ParseError> {
        if self.in_deletion && self.clause.is_empty() {
            return Err(ParseError::syntax(
                self.offset,
                "unexpected end of proof after deletion marker",
            ));
        }
        self.check_closed()
    }

    fn check_closed(&self) -> Result<(), ParseError> {
        if !self.clause.is_empty() {
            return Err(ParseError::syntax(
                self.offset,
                "unexpected end of input within a clause",
            ));
        }
        Ok(())
    }

    fn error(&self, start: usize, pos: usize, message: impl Into<String>) -> ParseError {
        ParseError::syntax(self.offset + (pos - start) as u64, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use proptest::prelude::*;

    macro_rules! assert_matches {
        ($value:expr, $matches:pat) => {
            let value = $value;
            assert!(
                matches!(&value, &$matches),
                "{:?} does not match {}",
                value,
                stringify!($matches)
            );
        };
    }

    fn lits(numbers: &[SignedLitIdx]) -> Vec<Lit> {
        numbers
            .iter()
            .map(|&number| Lit::from_dimacs(number).unwrap())
            .collect()
    }

    /// Parses `input` as a single chunk.
    fn parse_all(mode: Mode, input: &[u8]) -> Result<Vec<(bool, Vec<Lit>)>, ParseError> {
        parse_split(mode, input, &[])
    }

    /// Parses `input` split at the given positions, carrying unconsumed bytes into the next chunk
    /// like the drivers do.
    fn parse_split(
        mode: Mode,
        input: &[u8],
        splits: &[usize],
    ) -> Result<Vec<(bool, Vec<Lit>)>, ParseError> {
        let mut parser = TextChunkParser::new(mode);
        let mut steps = vec![];
        let mut pending: Vec<u8> = vec![];
        let mut last = 0;
        let ends = splits.iter().copied().chain(std::iter::once(input.len()));
        for split in ends {
            pending.extend_from_slice(&input[last..split]);
            last = split;
            let end = parser.parse(&pending, 0, |step: ProofStep| {
                steps.push((step.is_addition, step.lits.to_vec()));
                Ok::<_, ParseError>(())
            })?;
            pending.drain(..end);
        }
        if !pending.is_empty() {
            return Err(ParseError::syntax(parser.offset(), "unconsumed"));
        }
        match mode {
            Mode::Cnf => parser.check_closed()?,
            Mode::Drat => parser.finish_drat()?,
        }
        Ok(steps)
    }

    /// Positions after which a driver may end a chunk.
    fn boundaries(input: &[u8]) -> Vec<usize> {
        (1..input.len())
            .filter(|&pos| is_space(input[pos - 1]))
            .collect()
    }

    #[test]
    fn cnf_clauses() -> Result<()> {
        assert_eq!(
            parse_all(Mode::Cnf, b" -1 2 0 2 -3 1 0")?,
            vec![(true, lits(&[-1, 2])), (true, lits(&[2, -3, 1]))]
        );
        assert_eq!(parse_all(Mode::Cnf, b" 0")?, vec![(true, vec![])]);
        assert_eq!(parse_all(Mode::Cnf, b"")?, vec![]);
        Ok(())
    }

    #[test]
    fn cnf_whitespace_and_comments() -> Result<()> {
        let input = b"\nc \x0b bar\n\t\t2 3\r\n\r4 0     0 -1 0\t1\r2\n3\x0b0 1\nc baz   \n -2 0";
        assert_eq!(
            parse_all(Mode::Cnf, input)?,
            vec![
                (true, lits(&[2, 3, 4])),
                (true, vec![]),
                (true, lits(&[-1])),
                (true, lits(&[1, 2, 3])),
                (true, lits(&[1, -2])),
            ]
        );
        Ok(())
    }

    #[test]
    fn comment_within_clause() -> Result<()> {
        assert_eq!(
            parse_all(Mode::Cnf, b"1\nc foo\n2 0")?,
            vec![(true, lits(&[1, 2]))]
        );
        Ok(())
    }

    #[test]
    fn cnf_rejects_deletions() {
        assert_matches!(
            parse_all(Mode::Cnf, b"d 1 0\n"),
            Err(ParseError::SyntaxError { offset: 0, .. })
        );
    }

    #[test]
    fn invalid_tokens() {
        assert_matches!(
            parse_all(Mode::Cnf, b"1 x 0"),
            Err(ParseError::SyntaxError { offset: 2, .. })
        );
        assert_matches!(
            parse_all(Mode::Cnf, b"1 2-3 0"),
            Err(ParseError::SyntaxError { offset: 2, .. })
        );
        assert_matches!(
            parse_all(Mode::Drat, b"d1 0"),
            Err(ParseError::SyntaxError { offset: 1, .. })
        );
    }

    #[test]
    fn literal_range() -> Result<()> {
        assert_eq!(
            parse_all(Mode::Cnf, b"2147483647 -2147483647 0")?,
            vec![(true, lits(&[SignedLitIdx::MAX, -SignedLitIdx::MAX]))]
        );
        for input in [
            &b"2147483648 0"[..],
            b"-2147483648 0",
            b"-2147483649 0",
            b"99999999999999999999999 0",
        ] {
            assert_matches!(
                parse_all(Mode::Cnf, input),
                Err(ParseError::SyntaxError { offset: 0, .. })
            );
        }
        Ok(())
    }

    #[test]
    fn drat_steps() -> Result<()> {
        assert_eq!(
            parse_all(Mode::Drat, b"1 2 0\nd 1 2 0\nd\n-3 c\n0\n0\n")?,
            vec![
                (true, lits(&[1, 2])),
                (false, lits(&[1, 2])),
                (false, lits(&[-3])),
                (true, vec![]),
            ]
        );
        Ok(())
    }

    #[test]
    fn drat_deletion_marker_misuse() {
        assert_matches!(
            parse_all(Mode::Drat, b"1 d 2 0\n"),
            Err(ParseError::SyntaxError { offset: 2, .. })
        );
        assert_matches!(
            parse_all(Mode::Drat, b"d d 2 0\n"),
            Err(ParseError::SyntaxError { offset: 2, .. })
        );
        assert_matches!(
            parse_all(Mode::Drat, b"1 2 0\nd "),
            Err(ParseError::SyntaxError { offset: 8, .. })
        );
        assert_matches!(
            parse_all(Mode::Drat, b"1 2 0\nd"),
            Err(ParseError::SyntaxError { .. })
        );
    }

    #[test]
    fn open_clause_at_end() {
        assert_matches!(
            parse_all(Mode::Drat, b"1 2 0\n3"),
            Err(ParseError::SyntaxError { offset: 7, .. })
        );
        assert_matches!(
            parse_all(Mode::Cnf, b"-5 0 -1"),
            Err(ParseError::SyntaxError { .. })
        );
    }

    #[test]
    fn trailing_comment() -> Result<()> {
        assert_eq!(
            parse_all(Mode::Drat, b"1 0\nc foo\nc bar")?,
            vec![(true, lits(&[1]))]
        );
        Ok(())
    }

    #[test]
    fn comment_spanning_chunks() -> Result<()> {
        let mut parser = TextChunkParser::new(Mode::Cnf);
        let mut clauses = vec![];
        let mut on_step = |step: ProofStep| {
            clauses.push(step.lits.to_vec());
            Ok::<_, ParseError>(())
        };

        assert_eq!(parser.parse(b"1 c 2 ", 0, &mut on_step)?, 6);
        assert_eq!(parser.parse(b"3 0 ", 0, &mut on_step)?, 4);
        assert_eq!(parser.parse(b"\n0 ", 0, &mut on_step)?, 3);
        assert_eq!(parser.offset(), 13);
        parser.check_closed()?;

        assert_eq!(clauses, vec![lits(&[1])]);
        Ok(())
    }

    #[test]
    fn unconsumed_tokens() -> Result<()> {
        let mut parser = TextChunkParser::new(Mode::Drat);
        let mut steps = vec![];
        let mut on_step = |step: ProofStep| {
            steps.push((step.is_addition, step.lits.to_vec()));
            Ok::<_, ParseError>(())
        };

        assert_eq!(parser.parse(b"1 -", 0, &mut on_step)?, 2);
        assert_eq!(parser.parse(b"-2 0 d", 0, &mut on_step)?, 5);
        assert_eq!(parser.parse(b"d 2 0\n", 0, &mut on_step)?, 6);
        parser.finish_drat()?;

        assert_eq!(steps, vec![(true, lits(&[1, -2])), (false, lits(&[2]))]);
        Ok(())
    }

    #[test]
    fn start_position() -> Result<()> {
        let mut parser = TextChunkParser::new(Mode::Cnf);
        parser.advance_offset(10);
        let mut clauses = vec![];
        let end = parser.parse(b"p cnf 1 1 1 0\n", 9, |step: ProofStep| {
            clauses.push(step.lits.to_vec());
            Ok::<_, ParseError>(())
        })?;
        assert_eq!(end, 14);
        assert_eq!(parser.offset(), 15);
        assert_eq!(clauses, vec![lits(&[1])]);
        Ok(())
    }

    #[test]
    fn callback_errors_abort() {
        let mut parser = TextChunkParser::new(Mode::Cnf);
        let result = parser.parse(b"1 0 2 0 3 0", 0, |step: ProofStep| {
            if step.lits.len() == 1 && step.lits[0] == Lit::from_index(1, true) {
                anyhow::bail!("stop")
            }
            Ok(())
        });
        assert_eq!(result.unwrap_err().to_string(), "stop");
        assert_eq!(parser.clause_count(), 1);
    }

    #[test]
    fn chunk_boundary_invariance() -> Result<()> {
        let inputs: [(Mode, &[u8]); 4] = [
            (Mode::Cnf, b"c head\n 1 -2 0\nc x 1 0\n\t33 \r\n0 -2147483647 0 c\n"),
            (Mode::Drat, b"1 2 0\nd 1 2 0\nd\n-3 c\n0\nc d 5 0\n0\n"),
            (Mode::Drat, b"d  -12345 c\nc\n 7 0 d c 9\n1 0"),
            (Mode::Cnf, b"1 2 0 3 -"),
        ];
        for (mode, input) in inputs {
            let expected = parse_all(mode, input).map_err(|err| err.to_string());
            let splits = boundaries(input);
            for &split in &splits {
                let result = parse_split(mode, input, &[split]).map_err(|err| err.to_string());
                assert_eq!(result, expected, "split at {}", split);
            }
            let result = parse_split(mode, input, &splits).map_err(|err| err.to_string());
            assert_eq!(result, expected, "split at every boundary");
        }
        Ok(())
    }

    fn number() -> impl Strategy<Value = SignedLitIdx> {
        (prop_oneof![1i32..50, 1..=SignedLitIdx::MAX], any::<bool>())
            .prop_map(|(number, negative)| if negative { -number } else { number })
    }

    fn separator() -> impl Strategy<Value = &'static str> {
        prop_oneof![
            Just(" "),
            Just("\n"),
            Just("\t "),
            Just("\r\n"),
            Just(" c 7 0 d\n"),
            Just("\nc d 5 0\n\n"),
        ]
    }

    fn step() -> impl Strategy<Value = (bool, Vec<SignedLitIdx>)> {
        (any::<bool>(), prop::collection::vec(number(), 0..6))
    }

    /// Renders steps as text, cycling through the given separators after every token.
    fn render(steps: &[(bool, Vec<SignedLitIdx>)], separators: &[&str]) -> Vec<u8> {
        let mut separators = separators.iter().cycle();
        let mut out = vec![];
        for (is_addition, numbers) in steps {
            let tokens = (!is_addition)
                .then(|| "d".to_owned())
                .into_iter()
                .chain(numbers.iter().map(|number| number.to_string()))
                .chain(std::iter::once("0".to_owned()));
            for token in tokens {
                out.extend_from_slice(token.as_bytes());
                out.extend_from_slice(separators.next().unwrap().as_bytes());
            }
        }
        out
    }

    fn pick_splits(input: &[u8], picks: &[prop::sample::Index]) -> Vec<usize> {
        let candidates = boundaries(input);
        if candidates.is_empty() {
            return vec![];
        }
        let mut splits: Vec<usize> = picks
            .iter()
            .map(|pick| candidates[pick.index(candidates.len())])
            .collect();
        splits.sort_unstable();
        splits.dedup();
        splits
    }

    proptest! {
        #[test]
        fn drat_steps_survive_any_chunking(
            steps in prop::collection::vec(step(), 0..12),
            separators in prop::collection::vec(separator(), 1..6),
            picks in prop::collection::vec(any::<prop::sample::Index>(), 0..8),
        ) {
            let input = render(&steps, &separators);
            let splits = pick_splits(&input, &picks);
            let expected: Vec<_> = steps
                .iter()
                .map(|(is_addition, numbers)| (*is_addition, lits(numbers)))
                .collect();
            let result = parse_split(Mode::Drat, &input, &splits).map_err(|err| err.to_string());
            prop_assert_eq!(result, Ok(expected));
        }

        #[test]
        fn cnf_clauses_survive_any_chunking(
            clauses in prop::collection::vec(prop::collection::vec(number(), 0..6), 0..12),
            separators in prop::collection::vec(separator(), 1..6),
            picks in prop::collection::vec(any::<prop::sample::Index>(), 0..8),
        ) {
            let steps: Vec<_> = clauses.into_iter().map(|clause| (true, clause)).collect();
            let input = render(&steps, &separators);
            let splits = pick_splits(&input, &picks);
            let expected: Vec<_> = steps
                .iter()
                .map(|(_, numbers)| (true, lits(numbers)))
                .collect();
            let result = parse_split(Mode::Cnf, &input, &splits).map_err(|err| err.to_string());
            prop_assert_eq!(result, Ok(expected));
        }
    }
}
