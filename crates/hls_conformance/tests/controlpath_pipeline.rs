//! End-to-end control-path generation driven by `hls.toml` settings.

use hls_conformance::{bits, make_config, run_controlpath, unit_context, Datapath};
use hls_controlpath::{
    ColumnCompressor, ControlpathError, FlowMatrix, MISSING_ELSE_MULTI, MISSING_ELSE_SINGLE,
};
use hls_fixed::{HwValue, Unsigned};
use hls_ir::{ConstValue, Expr, Flow, ProcessKind, SignalRef, Statement};

// ---------------------------------------------------------------------------
// Helper: the three-step register load R := A0 / A1 / A2
// ---------------------------------------------------------------------------

struct Load {
    dp: Datapath,
    r: SignalRef,
    sources: Vec<SignalRef>,
}

fn load_datapath() -> Load {
    let mut dp = Datapath::new("load3");
    let r = dp.signal("R", 8);
    let sources = (0..3).map(|i| dp.signal(&format!("A{i}"), 8)).collect();
    Load { dp, r, sources }
}

fn load_matrix(l: &Load, neutral: Flow) -> FlowMatrix {
    let mut m = FlowMatrix::new();
    for (step, src) in l.sources.iter().enumerate() {
        m.add(step, Flow::signal(l.r.clone(), src.clone()));
        m.append_comment(step, &format!("R := A{step}"));
    }
    m.add_neutral(neutral);
    m
}

// ===========================================================================
// FSM builder
// ===========================================================================

#[test]
fn fsm_three_step_load() {
    let mut l = load_datapath();
    let mut m = load_matrix(&l, Flow::value(l.r.clone(), bits("00000000")));
    let config = make_config("").unwrap();
    let run = run_controlpath(&mut l.dp, &mut m, 3, &config).unwrap();

    let process = l.dp.process("CombFSM").expect("FSM process");
    assert_eq!(process.kind, ProcessKind::Combinational);
    let state = l
        .dp
        .component()
        .find_signal(l.dp.interner.get_or_intern("State"))
        .expect("state signal");
    let mut expected: Vec<_> = l.sources.iter().map(SignalRef::signal).collect();
    expected.push(state);
    assert_eq!(process.sensitivity, expected);

    let stmts = process.body.as_slice();
    assert_eq!(
        stmts[0],
        Statement::Assign {
            target: l.r.clone(),
            value: Expr::Const(bits("00000000")),
        }
    );
    let Statement::Case { arms, default, .. } = &stmts[1] else {
        panic!("expected state dispatch");
    };
    assert_eq!(arms.len(), 3);
    for (step, arm) in arms.iter().enumerate() {
        let body = arm.body.as_slice();
        assert_eq!(body[0], Statement::Comment(format!("R := A{step}")));
        assert_eq!(
            body[1],
            Statement::Assign {
                target: l.r.clone(),
                value: Expr::Signal(l.sources[step].clone()),
            }
        );
    }
    assert_eq!(
        default.as_deref().map(Statement::as_slice).map(<[Statement]>::len),
        Some(1)
    );

    let report = l
        .dp
        .component()
        .document("load3_FSM_report.txt")
        .expect("mux report");
    assert!(report.content.starts_with("MUX target R, fan-in: 4\n"));
    assert!(report.content.contains("  R <= A1\n"));

    assert_eq!(run.warning_count, 0);
    assert!(run.rendered.contains("  --> load3/CombFSM\n"));
}

#[test]
fn fsm_needs_enough_states() {
    let mut l = load_datapath();
    let mut m = load_matrix(&l, Flow::value(l.r.clone(), bits("00000000")));
    let config = make_config("").unwrap();
    let err = run_controlpath(&mut l.dp, &mut m, 2, &config).err().unwrap();
    assert!(matches!(err, ControlpathError::Precondition(_)));
    assert!(l.dp.process("CombFSM").is_none());
}

#[test]
fn fsm_mux_report_can_be_disabled() {
    let mut l = load_datapath();
    let mut m = load_matrix(&l, Flow::value(l.r.clone(), bits("00000000")));
    let config = make_config("[controlpath]\nmux_report = false\n").unwrap();
    run_controlpath(&mut l.dp, &mut m, 3, &config).unwrap();
    assert!(l.dp.component().documents.is_empty());
}

// ===========================================================================
// Tri-state builder
// ===========================================================================

#[test]
fn tristate_three_step_load() {
    let mut l = load_datapath();
    let mut m = load_matrix(&l, FlowMatrix::create_dont_care_flow(l.r.clone(), 8));
    let config = make_config("[controlpath]\nbuilder = \"tristate-fsm\"\n").unwrap();
    let run = run_controlpath(&mut l.dp, &mut m, 3, &config).unwrap();
    assert_eq!(run.warning_count, 0);

    let drivers = l.dp.process("TristateConc").expect("driver process");
    assert_eq!(drivers.kind, ProcessKind::Concurrent);
    let assigns = drivers.body.assignments();
    assert_eq!(assigns.len(), 3);
    for (i, (target, value)) in assigns.into_iter().enumerate() {
        assert_eq!(target, &l.r);
        let Expr::Ternary {
            true_val,
            false_val,
            ..
        } = value
        else {
            panic!("expected conditional driver");
        };
        assert_eq!(**true_val, Expr::Signal(l.sources[i].clone()));
        assert_eq!(**false_val, Expr::Const(bits("ZZZZZZZZ")));
    }

    // R is a bus; the FSM process drives nothing but still dispatches.
    let fsm = l.dp.process("CombFSM").expect("FSM process");
    assert!(fsm.body.assignments().is_empty());
    assert!(l
        .dp
        .component()
        .document("load3_TristateFSM_report.txt")
        .is_some());
}

#[test]
fn tristate_missing_else_warns() {
    let mut dp = Datapath::new("dp");
    let bus = dp.signal("Bus", 4);
    let out = dp.signal("Out", 4);
    let a = dp.signal("A", 4);
    let b = dp.signal("B", 4);
    let mut m = FlowMatrix::new();
    m.add(0, Flow::signal(bus.clone(), a.clone()));
    m.add(1, Flow::signal(bus, b));
    m.add(1, Flow::signal(out, a));
    let config = make_config("[controlpath]\nbuilder = \"tristate-fsm\"\n").unwrap();
    let run = run_controlpath(&mut dp, &mut m, 2, &config).unwrap();

    assert_eq!(run.warning_count, 2);
    let codes: Vec<_> = run
        .diagnostics
        .iter()
        .filter(|d| d.code != hls_controlpath::CONTROLPATH_SUMMARY)
        .map(|d| d.code)
        .collect();
    assert_eq!(codes, [MISSING_ELSE_MULTI, MISSING_ELSE_SINGLE]);
    assert!(run.rendered.contains("warning[W301]: tri-state target `Bus`"));
    assert!(run.rendered.contains("   = help: give the target a don't-care neutral flow\n"));
}

#[test]
fn tristate_missing_else_can_fail() {
    let mut dp = Datapath::new("dp");
    let bus = dp.signal("Bus", 4);
    let a = dp.signal("A", 4);
    let mut m = FlowMatrix::new();
    m.add(0, Flow::signal(bus, a));
    let config = make_config(
        "[controlpath]\nbuilder = \"tristate-fsm\"\nmissing_else_flow = \"error\"\n",
    )
    .unwrap();
    assert!(matches!(
        run_controlpath(&mut dp, &mut m, 1, &config),
        Err(ControlpathError::Precondition(_))
    ));
}

// ===========================================================================
// Numeric constants and column compression
// ===========================================================================

#[test]
fn hardware_constants_flow_through_fsm() {
    let config = make_config("[fixed_point]\noverflow_mode = \"saturate\"\n").unwrap();
    let ctx = unit_context(&config);
    let base = Unsigned::from_u64(250, 8, &ctx).unwrap();
    let step = Unsigned::from_u64(10, 8, &ctx).unwrap();
    let saturated: ConstValue = HwValue::from(base.add(&step, &ctx).unwrap()).into();

    let mut dp = Datapath::new("acc");
    let r = dp.signal("R", 8);
    let mut m = FlowMatrix::new();
    m.add(0, Flow::value(r.clone(), saturated.clone()));
    m.add_neutral(Flow::value(r.clone(), HwValue::from(Unsigned::zero_of(8)).into()));
    run_controlpath(&mut dp, &mut m, 1, &config).unwrap();

    let fsm = dp.process("CombFSM").unwrap();
    let Statement::Case { arms, .. } = &fsm.body.as_slice()[1] else {
        panic!("expected state dispatch");
    };
    assert_eq!(
        arms[0].body.as_slice(),
        [Statement::Assign {
            target: r,
            value: Expr::Const(saturated),
        }]
    );
    let report = &dp.component().document("acc_FSM_report.txt").unwrap().content;
    assert!(report.contains("  R <= 255\n"));
}

#[test]
fn compression_follows_microcode_config() {
    let mut l = load_datapath();
    let en = l.dp.signal("En", 1);
    let mut m = load_matrix(&l, Flow::value(l.r.clone(), bits("00000000")));
    m.add_neutral(Flow::value(en.clone(), bits("0")));
    for step in 0..3 {
        m.add(step, Flow::value(en.clone(), bits("1")));
    }
    m.add(3, Flow::value(l.r.clone(), bits("00000000")));

    let config = make_config("[microcode]\nmax_select_width = 2\n").unwrap();
    let plan = ColumnCompressor::compress(&m, config.microcode.max_select_width).unwrap();
    assert!(plan.select_bits() <= plan.uncompressed_select_bits());
    assert!(plan
        .columns()
        .iter()
        .all(|c| c.select_width() <= config.microcode.max_select_width));
    assert!(plan.report().contains("  Maximum LUT inputs: 2\n"));
    for step in 0..m.num_csteps() {
        let realized = plan.step_flow(step);
        for flow in m.flow(step).flows() {
            assert_eq!(realized.lookup_target(&flow.target), Some(flow));
        }
    }
}
