/// One (input, expected-output) pair of blob names, bound by sort order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestPair {
    /// 1-based position in pairing order.
    pub ord: usize,
    pub input: String,
    pub expected: String,
}

/// Sorts each name collection lexicographically and pairs positionally.
/// Names are not cross-validated; the provider's naming convention is trusted.
/// When the collections differ in length, surplus entries in the longer one
/// are dropped and a warning is logged.
pub fn pair_testcases(mut inputs: Vec<String>, mut expected: Vec<String>) -> Vec<TestPair> {
    inputs.sort();
    expected.sort();

    if inputs.len() != expected.len() {
        log::warn!(
            "Testcase collections differ in length (inputs={}, outputs={}); ignoring surplus",
            inputs.len(),
            expected.len(),
        );
    }

    inputs
        .into_iter()
        .zip(expected)
        .enumerate()
        .map(|(i, (input, expected))| TestPair {
            ord: i + 1,
            input,
            expected,
        })
        .collect()
}
