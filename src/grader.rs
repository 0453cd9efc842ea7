//! "Run code" for practice questions.
//!
//! Nothing is compiled or executed: a test case passes when the lowercased
//! code contains the print call the expected output implies. Two different
//! programs containing the same call score identically.

use serde::Serialize;

use crate::domain::TestCase;

const HELLO_WORLD_OUTPUT: &str = "hello, world";
const HELLO_WORLD_CALL: &str = "system.out.println(\"hello, world!\")";
const PRINT_CALL: &str = "system.out.println";

pub const ALL_PASSED: &str = "🎉 All test cases passed!";
pub const SOME_FAILED: &str = "⚠️ Some test cases failed. Try again!";

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct CaseResult {
  /// 1-based, as shown to the user.
  pub index: usize,
  pub passed: bool,
  pub expected: String,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
  pub cases: Vec<CaseResult>,
  pub all_passed: bool,
  pub output: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum RunOutcome {
  /// Blank code; nothing ran.
  Empty,
  Ran(RunReport),
}

/// The substring the expected output calls for.
fn required_call(expected_lower: &str) -> &'static str {
  if expected_lower.contains(HELLO_WORLD_OUTPUT) {
    HELLO_WORLD_CALL
  } else {
    PRINT_CALL
  }
}

pub fn check_case(code: &str, case: &TestCase) -> bool {
  let expected = case.output.to_lowercase();
  code.to_lowercase().contains(required_call(&expected))
}

pub fn run(code: &str, cases: &[TestCase]) -> RunOutcome {
  if code.trim().is_empty() {
    return RunOutcome::Empty;
  }

  let mut output = String::new();
  let mut results = Vec::with_capacity(cases.len());
  for (i, case) in cases.iter().enumerate() {
    let index = i + 1;
    let passed = check_case(code, case);
    if passed {
      output.push_str(&format!("✅ Test case {} passed\n", index));
    } else {
      output.push_str(&format!("❌ Test case {} failed\nExpected: {}\n", index, case.output));
    }
    results.push(CaseResult { index, passed, expected: case.output.clone() });
  }

  let all_passed = results.iter().all(|r| r.passed);
  output.push('\n');
  output.push_str(if all_passed { ALL_PASSED } else { SOME_FAILED });

  RunOutcome::Ran(RunReport { cases: results, all_passed, output })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn expect(output: &str) -> TestCase {
    TestCase { input: String::new(), output: output.into(), is_public: true }
  }

  fn report(outcome: RunOutcome) -> RunReport {
    match outcome {
      RunOutcome::Ran(r) => r,
      RunOutcome::Empty => panic!("expected a run"),
    }
  }

  #[test]
  fn hello_world_passes_and_reports_all_passed() {
    let r = report(run("System.out.println(\"Hello, World!\")", &[expect("Hello, World!")]));
    assert_eq!(r.cases.len(), 1);
    assert!(r.cases[0].passed);
    assert!(r.all_passed);
    assert_eq!(r.output, format!("✅ Test case 1 passed\n\n{}", ALL_PASSED));
  }

  #[test]
  fn matching_ignores_input_casing() {
    let case = expect("Hello, World!");
    assert!(check_case("SYSTEM.OUT.PRINTLN(\"HELLO, WORLD!\");", &case));
    assert!(check_case("system.out.println(\"hello, world!\");", &case));
  }

  #[test]
  fn hello_world_needs_the_exact_call() {
    let case = expect("Hello, World!");
    assert!(!check_case("System.out.println(\"Hello World\");", &case));
    assert!(!check_case("System.out.print(\"Hello, World!\");", &case));
  }

  #[test]
  fn other_outputs_only_need_a_println() {
    let case = expect("120");
    assert!(check_case("class A { void f() { System.out.println(x); } }", &case));
    assert!(!check_case("return 120;", &case));
  }

  #[test]
  fn unrelated_code_with_a_println_still_passes() {
    // Pattern presence, not execution.
    let r = report(run("System.out.println(\"not even close\");", &[expect("5"), expect("6")]));
    assert!(r.all_passed);
  }

  #[test]
  fn failures_list_expected_output() {
    let r = report(run("int x = 1;", &[expect("42")]));
    assert!(!r.all_passed);
    assert_eq!(r.output, format!("❌ Test case 1 failed\nExpected: 42\n\n{}", SOME_FAILED));
  }

  #[test]
  fn mixed_results_are_indexed_from_one() {
    let code = "System.out.println(\"Hello World\");";
    let r = report(run(code, &[expect("Hello, World!"), expect("7")]));
    assert_eq!(r.cases[0], CaseResult { index: 1, passed: false, expected: "Hello, World!".into() });
    assert!(r.cases[1].passed);
    assert_eq!(r.cases[1].index, 2);
    assert!(!r.all_passed);
  }

  #[test]
  fn blank_code_does_not_run() {
    assert_eq!(run("   \n\t", &[expect("x")]), RunOutcome::Empty);
  }

  #[test]
  fn no_cases_is_vacuously_passed() {
    let r = report(run("int x;", &[]));
    assert!(r.all_passed);
    assert!(r.cases.is_empty());
  }
}
