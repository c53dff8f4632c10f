//! Joint re-encoding of two control-symbol streams.
//!
//! A control-word column assigns every control step a symbol: `0` when the
//! column does not care, otherwise a 1-based id selecting one of the
//! column's flows. Two columns that are rarely active at the same time can
//! share one select field if their symbols are re-encoded together.

use crate::error::{ControlpathError, ControlpathResult};

/// The result of [`encode_together`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedEncoding {
    /// The merged symbol per position; `0` where both inputs are `0`.
    pub symbols: Vec<usize>,
    /// Merged symbol `s` decodes to `enc_map0[s - 1]` in the first stream.
    pub enc_map0: Vec<usize>,
    /// Merged symbol `s` decodes to `enc_map1[s - 1]` in the second stream.
    pub enc_map1: Vec<usize>,
}

impl MergedEncoding {
    /// Number of distinct merged symbols.
    pub fn num_symbols(&self) -> usize {
        self.enc_map0.len()
    }

    fn lookup(&self, s0: usize, s1: usize) -> Option<usize> {
        self.enc_map0
            .iter()
            .zip(&self.enc_map1)
            .position(|(&a, &b)| a == s0 && b == s1)
            .map(|i| i + 1)
    }

    fn pair(&mut self, s0: usize, s1: usize) -> usize {
        match self.lookup(s0, s1) {
            Some(sym) => sym,
            None => {
                self.enc_map0.push(s0);
                self.enc_map1.push(s1);
                self.enc_map0.len()
            }
        }
    }

    /// Checks that every merged symbol decodes to the inputs it replaced.
    pub fn verify(&self, seq0: &[usize], seq1: &[usize]) -> bool {
        if seq0.len() != self.symbols.len()
            || seq1.len() != self.symbols.len()
            || self.enc_map0.len() != self.enc_map1.len()
        {
            return false;
        }
        self.symbols
            .iter()
            .zip(seq0.iter().zip(seq1))
            .all(|(&sym, (&s0, &s1))| {
                if sym == 0 {
                    return s0 == 0 && s1 == 0;
                }
                let (Some(&d0), Some(&d1)) =
                    (self.enc_map0.get(sym - 1), self.enc_map1.get(sym - 1))
                else {
                    return false;
                };
                (s0 == 0 || s0 == d0) && (s1 == 0 || s1 == d1)
            })
    }
}

fn check_stream(seq: &[usize], num_symbols: usize, which: &str) -> ControlpathResult<()> {
    match seq.iter().find(|&&s| s > num_symbols) {
        Some(s) => Err(ControlpathError::Precondition(format!(
            "{which} stream uses symbol {s} but declares only {num_symbols}"
        ))),
        None => Ok(()),
    }
}

/// Merges two parallel symbol streams into one minimal stream.
///
/// Positions where both streams are active get one merged symbol per
/// distinct pair, in first-seen order. Positions where only one stream is
/// active reuse the first existing pairing of that symbol (scanning the
/// other stream's symbols upward) or pair it with symbol 1. A declared
/// symbol count of 0 counts as 1.
pub fn encode_together(
    seq0: &[usize],
    num_symbols0: usize,
    seq1: &[usize],
    num_symbols1: usize,
) -> ControlpathResult<MergedEncoding> {
    if seq0.len() != seq1.len() {
        return Err(ControlpathError::Precondition(format!(
            "symbol streams differ in length ({} vs {})",
            seq0.len(),
            seq1.len()
        )));
    }
    let n0 = num_symbols0.max(1);
    let n1 = num_symbols1.max(1);
    check_stream(seq0, n0, "first")?;
    check_stream(seq1, n1, "second")?;

    let mut enc = MergedEncoding {
        symbols: vec![0; seq0.len()],
        enc_map0: Vec::new(),
        enc_map1: Vec::new(),
    };

    for (i, (&s0, &s1)) in seq0.iter().zip(seq1).enumerate() {
        if s0 != 0 && s1 != 0 {
            enc.symbols[i] = enc.pair(s0, s1);
        }
    }

    for (i, (&s0, &s1)) in seq0.iter().zip(seq1).enumerate() {
        if (s0 == 0) == (s1 == 0) {
            continue;
        }
        let existing = if s0 == 0 {
            (1..=n0).find_map(|t0| enc.lookup(t0, s1))
        } else {
            (1..=n1).find_map(|t1| enc.lookup(s0, t1))
        };
        enc.symbols[i] = match existing {
            Some(sym) => sym,
            None if s0 == 0 => enc.pair(1, s1),
            None => enc.pair(s0, 1),
        };
    }

    debug_assert!(enc.verify(seq0, seq1), "merged encoding does not decode");
    Ok(enc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_active_pairs_in_first_seen_order() {
        let enc = encode_together(&[1, 2, 1, 0], 2, &[1, 1, 1, 0], 1).unwrap();
        assert_eq!(enc.symbols, vec![1, 2, 1, 0]);
        assert_eq!(enc.enc_map0, vec![1, 2]);
        assert_eq!(enc.enc_map1, vec![1, 1]);
        assert!(enc.verify(&[1, 2, 1, 0], &[1, 1, 1, 0]));
    }

    #[test]
    fn single_active_reuses_existing_pairing() {
        let seq0 = [2, 0, 1, 0];
        let seq1 = [3, 3, 0, 2];
        let enc = encode_together(&seq0, 2, &seq1, 3).unwrap();
        // pass 1: (2,3) -> 1
        // pass 2: pos 1 reuses (2,3); pos 2 creates (1,1); pos 3 creates (1,2)
        assert_eq!(enc.symbols, vec![1, 1, 2, 3]);
        assert_eq!(enc.enc_map0, vec![2, 1, 1]);
        assert_eq!(enc.enc_map1, vec![3, 1, 2]);
        assert_eq!(enc.num_symbols(), 3);
        assert!(enc.verify(&seq0, &seq1));
    }

    #[test]
    fn zero_symbol_counts_count_as_one() {
        let enc = encode_together(&[0, 0], 0, &[0, 1], 0).unwrap();
        assert_eq!(enc.symbols, vec![0, 1]);
        assert_eq!(enc.enc_map0, vec![1]);
    }

    #[test]
    fn precondition_errors() {
        assert!(matches!(
            encode_together(&[1], 1, &[1, 1], 1),
            Err(ControlpathError::Precondition(_))
        ));
        assert!(matches!(
            encode_together(&[3], 2, &[1], 1),
            Err(ControlpathError::Precondition(_))
        ));
    }

    #[test]
    fn verify_rejects_tampering() {
        let seq0 = [1, 2];
        let seq1 = [1, 0];
        let mut enc = encode_together(&seq0, 2, &seq1, 1).unwrap();
        assert!(enc.verify(&seq0, &seq1));
        enc.symbols[1] = 1;
        assert!(!enc.verify(&seq0, &seq1));
        assert!(!enc.verify(&seq0[..1], &seq1[..1]));
    }
}
