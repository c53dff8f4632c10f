use hls_common::{Interner, LogicVec};
use hls_config::ControlpathConfig;
use hls_controlpath::{
    encode_together, ColumnCompressor, ComponentHost, ControlpathBuilder, FlowMatrix,
    FsmControlpathBuilder, TristateBusFsmControlpathBuilder,
};
use hls_diagnostics::DiagnosticSink;
use hls_ir::{ComponentId, ConstValue, Design, Flow, PortUsage, SignalRef, Statement, Type};
use proptest::prelude::*;

const TARGETS: usize = 3;

/// Per step, per target: `None` leaves it alone, `Some(v)` drives value `v`.
fn step_table() -> impl Strategy<Value = Vec<Vec<Option<u8>>>> {
    prop::collection::vec(prop::collection::vec(prop::option::of(0u8..4), TARGETS), 1..6)
}

fn symbol_streams() -> impl Strategy<Value = (usize, Vec<usize>, usize, Vec<usize>)> {
    (1usize..5, 1usize..5, 1usize..12).prop_flat_map(|(n0, n1, len)| {
        (
            Just(n0),
            prop::collection::vec(0..=n0, len),
            Just(n1),
            prop::collection::vec(0..=n1, len),
        )
    })
}

struct Harness {
    interner: Interner,
    sink: DiagnosticSink,
    config: ControlpathConfig,
    design: Design,
    top: ComponentId,
    targets: Vec<SignalRef>,
}

impl Harness {
    fn new() -> Self {
        let interner = Interner::new();
        let mut design = Design::new();
        let top = design.add_component(interner.get_or_intern("dp"));
        let ty = design.types.intern(Type::BitVec {
            width: 2,
            signed: false,
        });
        let targets = (0..TARGETS)
            .map(|i| {
                let name = interner.get_or_intern(&format!("T{i}"));
                SignalRef::Signal(design.component_mut(top).add_signal(
                    name,
                    ty,
                    PortUsage::Default,
                    None,
                ))
            })
            .collect();
        Self {
            interner,
            sink: DiagnosticSink::new(),
            config: ControlpathConfig::default(),
            design,
            top,
            targets,
        }
    }

    fn value(v: u8) -> ConstValue {
        ConstValue::Logic(LogicVec::from_u64(u64::from(v), 2))
    }

    fn matrix(&self, table: &[Vec<Option<u8>>], dont_care_neutral: bool) -> FlowMatrix {
        let mut m = FlowMatrix::new();
        for (step, row) in table.iter().enumerate() {
            for (t, cell) in row.iter().enumerate() {
                if let Some(v) = cell {
                    m.add(step, Flow::value(self.targets[t].clone(), Self::value(*v)));
                }
            }
        }
        for target in &self.targets {
            let neutral = if dont_care_neutral {
                FlowMatrix::create_dont_care_flow(target.clone(), 2)
            } else {
                Flow::value(target.clone(), Self::value(0))
            };
            m.add_neutral(neutral);
        }
        m
    }
}

proptest! {
    #[test]
    fn merged_encoding_decodes_both_streams((n0, s0, n1, s1) in symbol_streams()) {
        let enc = encode_together(&s0, n0, &s1, n1).unwrap();
        prop_assert!(enc.verify(&s0, &s1));
        prop_assert!(enc.num_symbols() <= n0 * n1);
        prop_assert_eq!(enc.symbols.len(), s0.len());
    }

    #[test]
    fn fsm_has_one_arm_per_state(table in step_table(), extra in 0usize..3) {
        let mut h = Harness::new();
        let mut m = h.matrix(&table, false);
        let states = table.len() + extra;
        {
            let mut host = ComponentHost::new(&mut h.design, h.top, &h.interner, &h.sink, &h.config);
            let mut builder = FsmControlpathBuilder::new(&mut host);
            builder.prepare_allocation(states).unwrap();
            builder.create_controlpath(&mut m, "dp").unwrap();
        }
        let process = h.design.component(h.top).processes.values().next().unwrap();
        let stmts = process.body.as_slice();
        // Neutral pre-set for every target, then the dispatch.
        prop_assert_eq!(stmts.len(), TARGETS + 1);
        let Statement::Case { arms, default, .. } = &stmts[TARGETS] else {
            panic!("expected case");
        };
        prop_assert_eq!(arms.len(), states);
        prop_assert!(default.is_some());
        for (step, row) in table.iter().enumerate() {
            let assigned: Vec<_> = arms[step].body.assignments().into_iter().map(|(t, _)| t.clone()).collect();
            for (t, cell) in row.iter().enumerate() {
                prop_assert_eq!(cell.is_some(), assigned.contains(&h.targets[t]));
            }
        }
    }

    #[test]
    fn tristate_output_is_deterministic(table in step_table()) {
        let run = || {
            let mut h = Harness::new();
            let mut m = h.matrix(&table, true);
            {
                let mut host = ComponentHost::new(&mut h.design, h.top, &h.interner, &h.sink, &h.config);
                let mut builder = TristateBusFsmControlpathBuilder::new(&mut host);
                builder.prepare_allocation(table.len()).unwrap();
                builder.create_controlpath(&mut m, "dp").unwrap();
            }
            h.design
                .component(h.top)
                .processes
                .values()
                .map(|p| (p.kind, p.body.clone(), p.sensitivity.clone()))
                .collect::<Vec<_>>()
        };
        prop_assert_eq!(run(), run());
    }

    #[test]
    fn compression_preserves_step_flows(table in step_table(), max in 1u32..6) {
        let h = Harness::new();
        let m = h.matrix(&table, false);
        let plan = ColumnCompressor::compress(&m, max).unwrap();
        prop_assert!(plan.select_bits() <= plan.uncompressed_select_bits());
        for column in plan.columns() {
            prop_assert!(column.select_width() <= max.max(2));
        }
        for step in 0..m.num_csteps() {
            let mut expected = m.neutral_flow().clone();
            expected.integrate(m.flow(step));
            let realized = plan.step_flow(step);
            for flow in expected.flows() {
                prop_assert_eq!(realized.lookup_target(&flow.target), Some(flow));
            }
        }
    }
}
