//! Greedy compression of control-word select columns.
//!
//! Every flow target becomes a column whose symbol per control step selects
//! the flow driving it. Columns are merged pairwise with
//! [`encode_together`] while a merge saves select bits and the merged
//! select field stays within the LUT input budget.

use crate::error::ControlpathResult;
use crate::matrix::FlowMatrix;
use crate::microcode::encode_together;
use hls_common::InternalError;
use hls_ir::{Flow, ParFlow, SignalRef};
use std::collections::{BTreeSet, HashSet};
use std::fmt::Write;

/// `ceil(log2(n))`, with 0 for `n <= 1`.
pub fn ceil_log2(n: usize) -> u32 {
    if n <= 1 {
        0
    } else {
        usize::BITS - (n - 1).leading_zeros()
    }
}

/// A select column: one symbol per control step plus its decode table.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedColumn {
    targets: Vec<SignalRef>,
    symbols: Vec<usize>,
    decode: Vec<ParFlow>,
}

impl EncodedColumn {
    /// Encodes the per-step flows into `target`.
    ///
    /// Each distinct concrete flow gets the next 1-based symbol. Steps with a
    /// don't-care or no flow get symbol 0. A column with no symbols at all
    /// gets one empty dummy symbol.
    pub fn from_flows(target: SignalRef, flows: &[Option<Flow>]) -> Self {
        let mut decode: Vec<ParFlow> = Vec::new();
        let mut symbols = Vec::with_capacity(flows.len());
        for flow in flows {
            let sym = match flow {
                Some(f) if !FlowMatrix::is_dont_care_flow(f) => {
                    match decode.iter().position(|p| p.flows() == std::slice::from_ref(f)) {
                        Some(i) => i + 1,
                        None => {
                            decode.push([f.clone()].into_iter().collect());
                            decode.len()
                        }
                    }
                }
                _ => 0,
            };
            symbols.push(sym);
        }
        if decode.is_empty() {
            decode.push(ParFlow::new());
        }
        Self {
            targets: vec![target],
            symbols,
            decode,
        }
    }

    /// The targets this column drives.
    pub fn targets(&self) -> &[SignalRef] {
        &self.targets
    }

    /// Symbol per control step; 0 means "don't care".
    pub fn symbols(&self) -> &[usize] {
        &self.symbols
    }

    /// Number of distinct symbols.
    pub fn num_symbols(&self) -> usize {
        self.decode.len()
    }

    /// Bits needed to select among the symbols.
    pub fn select_width(&self) -> u32 {
        ceil_log2(self.num_symbols())
    }

    /// The flows selected by each symbol, indexed by `symbol - 1`.
    pub fn decode(&self) -> &[ParFlow] {
        &self.decode
    }
}

/// Two columns re-encoded into one.
#[derive(Debug, Clone)]
pub struct MergedColumn {
    column: EncodedColumn,
    score: f64,
}

impl MergedColumn {
    /// Merges `c0` and `c1`.
    ///
    /// The score is the number of select bits saved:
    /// `ceil_log2(n0) + ceil_log2(n1) - log2(n)`.
    pub fn new(c0: &EncodedColumn, c1: &EncodedColumn) -> ControlpathResult<Self> {
        let enc = encode_together(&c0.symbols, c0.num_symbols(), &c1.symbols, c1.num_symbols())?;
        let decode = enc
            .enc_map0
            .iter()
            .zip(&enc.enc_map1)
            .map(|(&s0, &s1)| {
                let mut pflow = ParFlow::new();
                pflow.integrate(&c0.decode[s0.max(1) - 1]);
                pflow.integrate(&c1.decode[s1.max(1) - 1]);
                pflow
            })
            .collect::<Vec<_>>();
        let n = decode.len();
        let score = f64::from(ceil_log2(c0.num_symbols()) + ceil_log2(c1.num_symbols()))
            - (n.max(1) as f64).log2();
        let mut targets = c0.targets.clone();
        targets.extend(c1.targets.iter().cloned());
        let column = EncodedColumn {
            targets,
            symbols: enc.symbols,
            decode,
        };
        Ok(Self { column, score })
    }

    /// Select bits saved by this merge.
    pub fn score(&self) -> f64 {
        self.score
    }

    /// The merged column.
    pub fn column(&self) -> &EncodedColumn {
        &self.column
    }
}

/// A compressed control word layout.
#[derive(Debug, Clone)]
pub struct ColumnPlan {
    columns: Vec<EncodedColumn>,
    num_steps: usize,
    max_select_width: u32,
    uncompressed_select_bits: u32,
}

impl ColumnPlan {
    /// The columns after merging, in original column order.
    pub fn columns(&self) -> &[EncodedColumn] {
        &self.columns
    }

    /// The per-symbol flows of `column`.
    pub fn realize(&self, column: usize) -> Option<&[ParFlow]> {
        self.columns.get(column).map(EncodedColumn::decode)
    }

    /// The flows selected in `step` across all columns.
    pub fn step_flow(&self, step: usize) -> ParFlow {
        let mut pflow = ParFlow::new();
        for column in &self.columns {
            let sym = column.symbols.get(step).copied().unwrap_or(0).max(1);
            pflow.integrate(&column.decode[sym - 1]);
        }
        pflow
    }

    /// Total select bits before merging.
    pub fn uncompressed_select_bits(&self) -> u32 {
        self.uncompressed_select_bits
    }

    /// Total select bits after merging.
    pub fn select_bits(&self) -> u32 {
        self.columns.iter().map(EncodedColumn::select_width).sum()
    }

    /// A human-readable summary of the layout.
    pub fn report(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Control word encoding report");
        let _ = writeln!(out, "  Number of c-steps: {}", self.num_steps);
        let _ = writeln!(out, "  Maximum LUT inputs: {}", self.max_select_width);
        let _ = writeln!(
            out,
            "  Uncompressed CW: {} MUX bits",
            self.uncompressed_select_bits
        );
        let _ = writeln!(out, "  Compressed CW: {} MUX bits", self.select_bits());
        let widest = self
            .columns
            .iter()
            .map(EncodedColumn::select_width)
            .max()
            .unwrap_or(0);
        let _ = writeln!(out, "  Widest select: {widest}");
        let _ = writeln!(out);
        let _ = writeln!(out, "Number of MUX inputs; Number of occurrences");
        let mut histogram: std::collections::BTreeMap<u32, usize> = Default::default();
        for column in &self.columns {
            *histogram.entry(column.select_width()).or_default() += 1;
        }
        for (width, count) in histogram.into_iter().rev() {
            let _ = writeln!(out, "{width}; {count}");
        }
        out
    }
}

/// Greedy pairwise column merging.
pub struct ColumnCompressor;

impl ColumnCompressor {
    /// One column per target of `matrix`, each step reading the neutral
    /// flow overlaid with the step's own flows.
    pub fn columns(matrix: &FlowMatrix) -> Vec<EncodedColumn> {
        let step_flows: Vec<ParFlow> = (0..matrix.num_csteps())
            .map(|step| {
                let mut pflow = matrix.neutral_flow().clone();
                pflow.integrate(matrix.flow(step));
                pflow
            })
            .collect();
        matrix
            .flow_targets()
            .into_iter()
            .map(|target| {
                let flows: Vec<Option<Flow>> = step_flows
                    .iter()
                    .map(|p| p.lookup_target(&target).cloned())
                    .collect();
                EncodedColumn::from_flows(target, &flows)
            })
            .collect()
    }

    /// Merges the columns of `matrix` until no merge saves select bits.
    pub fn compress(matrix: &FlowMatrix, max_select_width: u32) -> ControlpathResult<ColumnPlan> {
        let mut current = Self::columns(matrix);
        let uncompressed_select_bits = current.iter().map(EncodedColumn::select_width).sum();
        let mut alive: BTreeSet<usize> = (0..current.len()).collect();

        loop {
            let mut candidates: Vec<(usize, usize, MergedColumn)> = Vec::new();
            for &i in &alive {
                if current[i].num_symbols() <= 1 {
                    continue;
                }
                for &j in alive.range(i + 1..) {
                    if current[j].num_symbols() <= 1 {
                        continue;
                    }
                    candidates.push((i, j, MergedColumn::new(&current[i], &current[j])?));
                }
            }
            candidates.sort_by(|a, b| b.2.score.total_cmp(&a.2.score));

            let mut used: HashSet<usize> = HashSet::new();
            let mut merged_any = false;
            for (i, j, merged) in candidates {
                if merged.score <= 0.0 {
                    break;
                }
                if merged.column.select_width() > max_select_width
                    || used.contains(&i)
                    || used.contains(&j)
                {
                    continue;
                }
                used.insert(i);
                used.insert(j);
                alive.remove(&j);
                current[i] = merged.column;
                merged_any = true;
            }
            if !merged_any {
                break;
            }
        }

        let columns: Vec<EncodedColumn> = alive.iter().map(|&i| current[i].clone()).collect();
        let covered: usize = columns.iter().map(|c| c.targets.len()).sum();
        if covered != matrix.flow_targets().len() {
            return Err(InternalError::new("column merge lost or duplicated a target").into());
        }
        Ok(ColumnPlan {
            columns,
            num_steps: matrix.num_csteps(),
            max_select_width,
            uncompressed_select_bits,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hls_common::LogicVec;
    use hls_ir::{ConstValue, SignalId};

    fn r(i: u32) -> SignalRef {
        SignalRef::Signal(SignalId::from_raw(i))
    }

    fn val(target: u32, v: u64) -> Flow {
        Flow::value(r(target), ConstValue::Logic(LogicVec::from_u64(v, 4)))
    }

    #[test]
    fn ceil_log2_values() {
        assert_eq!(ceil_log2(0), 0);
        assert_eq!(ceil_log2(1), 0);
        assert_eq!(ceil_log2(2), 1);
        assert_eq!(ceil_log2(3), 2);
        assert_eq!(ceil_log2(4), 2);
        assert_eq!(ceil_log2(5), 3);
    }

    #[test]
    fn column_symbols() {
        let flows = vec![
            Some(val(0, 1)),
            Some(FlowMatrix::create_dont_care_flow(r(0), 4)),
            Some(val(0, 2)),
            Some(val(0, 1)),
            None,
        ];
        let col = EncodedColumn::from_flows(r(0), &flows);
        assert_eq!(col.symbols(), &[1, 0, 2, 1, 0]);
        assert_eq!(col.num_symbols(), 2);
        assert_eq!(col.select_width(), 1);
        assert_eq!(col.decode()[1].flows(), &[val(0, 2)]);
    }

    #[test]
    fn empty_column_gets_dummy_symbol() {
        let col = EncodedColumn::from_flows(r(0), &[None, None]);
        assert_eq!(col.num_symbols(), 1);
        assert!(col.decode()[0].is_empty());
        assert_eq!(col.select_width(), 0);
    }

    #[test]
    fn correlated_columns_merge() {
        // Columns 0 and 1 switch together; merging them saves one bit.
        let mut m = FlowMatrix::new();
        for step in 0..4 {
            let v = (step % 2) as u64;
            m.add(step, val(0, v));
            m.add(step, val(1, v + 4));
        }
        let plan = ColumnCompressor::compress(&m, 6).unwrap();
        assert_eq!(plan.uncompressed_select_bits(), 2);
        assert_eq!(plan.columns().len(), 1);
        assert_eq!(plan.select_bits(), 1);
        assert_eq!(plan.columns()[0].targets(), &[r(0), r(1)]);
        for step in 0..4 {
            let realized = plan.step_flow(step);
            for flow in m.flow(step).flows() {
                assert_eq!(realized.lookup_target(&flow.target), Some(flow));
            }
        }
        assert_eq!(plan.realize(0).map(<[ParFlow]>::len), Some(2));
        assert!(plan.realize(1).is_none());
        let report = plan.report();
        assert!(report.contains("Uncompressed CW: 2 MUX bits"));
        assert!(report.contains("Compressed CW: 1 MUX bits"));
        assert!(report.ends_with("1; 1\n"));
    }

    #[test]
    fn select_width_budget_blocks_merges() {
        let mut m = FlowMatrix::new();
        for step in 0..4 {
            m.add(step, val(0, step as u64));
            m.add(step, val(1, (3 - step) as u64));
        }
        let plan = ColumnCompressor::compress(&m, 1).unwrap();
        assert_eq!(plan.columns().len(), 2);
        assert_eq!(plan.select_bits(), plan.uncompressed_select_bits());
    }
}
