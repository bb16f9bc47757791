use optimizer::eval::Machine;
use optimizer::ir::Program;
use optimizer::lower::lower;
use optimizer::parser::parse;
use optimizer::{compile, Optimizer, OptimizerConfig, OptimizerError, PassReport};
use proptest::prelude::*;
use rstest::rstest;

fn normalize(code: &str) -> String {
    code.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[test]
fn test_all_optimizations() {
    let input = "
        int a[100];
        int b[100];
        int c[100];
        int x;
        for (int i = 0; i <= 99; i++) {
            a[i] = b[i] + c[i];
            x = b[0] + c[0];
        }
        for (int i = 0; i <= 99; i++) {
            a[i] = a[i] + 1;
        }
    ";
    // Та же форма, что у ручного kernels::optimized
    let expected = "
        int a[100];
        int b[100];
        int c[100];
        int x;
        x = b[0] + c[0];
        for (int i = 0; i <= 99; i += 2) {
          a[i] = b[i] + c[i];
          a[i] = a[i] + 1;
          a[i+1] = b[i+1] + c[i+1];
          a[i+1] = a[i+1] + 1;
        }
    ";

    let compiled = Optimizer::new(OptimizerConfig::default())
        .unwrap()
        .compile(input)
        .unwrap();

    assert_eq!(normalize(&compiled.code), normalize(expected));
    assert_eq!(
        compiled.report,
        PassReport {
            hoisted: 1,
            fused: 1,
            unrolled: 1
        }
    );
}

#[test]
fn test_licm_with_odd_trip_count() {
    let input = "
        int a[101];
        int b[101];
        int c[101];
        for (int i = 0; i <= 100; i++) {
            a[i] = b[i] + c[i];
            x = b[0] + c[0];
        }
    ";
    let expected = "
        int a[101];
        int b[101];
        int c[101];
        x = b[0] + c[0];
        for (int i = 0; i < 100; i += 2) {
          a[i] = b[i] + c[i];
          a[i+1] = b[i+1] + c[i+1];
        }
        a[100] = b[100] + c[100];
    ";

    assert_eq!(normalize(&compile(input).unwrap()), normalize(expected));
}

#[test]
fn test_unrolling_only() {
    let input = "
        int a[100];
        int b[100];
        for (int i = 0; i < 100; i++) {
            a[i] = b[i] + 1;
        }
    ";
    let expected = "
        int a[100];
        int b[100];
        for (int i = 0; i < 100; i += 2) {
          a[i] = b[i] + 1;
          a[i+1] = b[i+1] + 1;
        }
    ";

    assert_eq!(normalize(&compile(input).unwrap()), normalize(expected));
}

#[rstest]
#[case(OptimizerConfig { licm: false, ..OptimizerConfig::default() }, PassReport { hoisted: 0, fused: 1, unrolled: 1 })]
#[case(OptimizerConfig { fusion: false, ..OptimizerConfig::default() }, PassReport { hoisted: 1, fused: 0, unrolled: 2 })]
#[case(OptimizerConfig { unroll: false, ..OptimizerConfig::default() }, PassReport { hoisted: 1, fused: 1, unrolled: 0 })]
#[case(OptimizerConfig::passthrough(), PassReport::default())]
fn test_pass_toggles(#[case] config: OptimizerConfig, #[case] expected: PassReport) {
    let input = "
        int a[8]; int b[8]; int c[8]; int x;
        for (int i = 0; i < 8; i++) { a[i] = b[i] + c[i]; x = b[0] + c[0]; }
        for (int i = 0; i < 8; i++) { a[i] = a[i] + 1; }
    ";

    let compiled = Optimizer::new(config).unwrap().compile(input).unwrap();

    // без LICM x остаётся в теле, но второй цикл его не трогает: слияние разрешено
    assert_eq!(compiled.report, expected);
}

#[test]
fn test_syntax_error_surfaces() {
    let err = compile("int a[4];\nfor (int i = 0; i < ; i++) {}").unwrap_err();
    assert_eq!(err.line(), Some(2));
    assert!(err.to_string().contains("expected number"));
}

#[rstest]
#[case("int a[4]; for (int i = 0; i < 2; i++) { a[i+9223372036854775807] = 1; }")]
#[case("int a[4]; for (int i = 0; i < 3; i++) { a[i+9223372036854775806] = 1; }")]
fn test_extreme_offsets_compile_without_unrolling(#[case] input: &str) {
    let compiled = Optimizer::new(OptimizerConfig::default())
        .unwrap()
        .compile(input)
        .unwrap();

    assert_eq!(compiled.report.unrolled, 0);
    assert!(compiled.code.contains("i++"));
}

#[test]
fn test_config_from_json_defaults_missing_fields() {
    let config: OptimizerConfig = serde_json::from_str(r#"{"unroll_factor": 4}"#).unwrap();
    assert_eq!(config.unroll_factor, 4);
    assert!(config.licm && config.fusion && config.unroll);

    let config: OptimizerConfig = serde_json::from_str(r#"{"unroll_factor": 0}"#).unwrap();
    assert!(matches!(Optimizer::new(config), Err(OptimizerError::InvalidConfig(_))));
}

// --- Семантика: оптимизированная программа оставляет ту же память ---

const PRELUDE: &str = "int a[64]; int b[64]; int c[64]; int x; int y;";

const LOOP_BODIES: &[&str] = &[
    "a[i] = b[i] + c[i];",
    "a[i] = a[i] + 1;",
    "x = b[0] + c[0];",
    "c[i] = a[i] + 2;",
    "b[i+1] = a[i] + b[i];",
    "y = x + 1;",
    "a[i] = c[i+1];",
    "b[3] = b[2] + 7;",
];

fn loop_source() -> impl Strategy<Value = String> {
    (
        0i64..4,
        0i64..40,
        any::<bool>(),
        prop::collection::vec(0..LOOP_BODIES.len(), 1..4),
    )
        .prop_map(|(start, span, inclusive, body)| {
            let cmp = if inclusive { "<=" } else { "<" };
            let body: Vec<&str> = body.into_iter().map(|i| LOOP_BODIES[i]).collect();
            format!(
                "for (int i = {start}; i {cmp} {end}; i++) {{ {body} }}",
                start = start,
                cmp = cmp,
                end = start + span,
                body = body.join(" ")
            )
        })
}

fn statement_source() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => loop_source(),
        1 => Just("y = x + 1;".to_string()),
        1 => Just("x = a[5];".to_string()),
    ]
}

fn program_source() -> impl Strategy<Value = String> {
    prop::collection::vec(statement_source(), 1..5)
        .prop_map(|stmts| format!("{} {}", PRELUDE, stmts.join(" ")))
}

fn execute(program: &Program) -> Machine {
    let mut machine = Machine::new(program);
    machine.fill_with("b", |i| i as i64).unwrap();
    machine.fill_with("c", |i| 64 - i as i64).unwrap();
    machine.run(program).unwrap();
    machine
}

proptest! {
    #[test]
    fn prop_passes_preserve_semantics(src in program_source(), factor in 1usize..5) {
        let original = lower(&parse(&src).unwrap()).unwrap();
        let config = OptimizerConfig { unroll_factor: factor, ..OptimizerConfig::default() };
        let compiled = Optimizer::new(config).unwrap().compile(&src).unwrap();

        prop_assert_eq!(execute(&original), execute(&compiled.program));
    }

    #[test]
    fn prop_output_reparses(src in program_source()) {
        let compiled = Optimizer::new(OptimizerConfig::default()).unwrap().compile(&src).unwrap();
        let reparsed = lower(&parse(&compiled.code).unwrap()).unwrap();

        prop_assert_eq!(reparsed, compiled.program);
    }
}
