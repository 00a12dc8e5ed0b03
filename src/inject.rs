//! Injects runtime input into test sources that read from a data file.

/// Placeholder token that example test files use where input data belongs.
pub const INPUT_PLACEHOLDER: &str = "INPUT_DATA";

/// Substitutes the first occurrence of [`INPUT_PLACEHOLDER`] in `test` with
/// `input`. Test files need to read input from files, but the playground
/// passes input data dynamically via the API, so the content is spliced in
/// before the request is built. Everything outside the placeholder is left
/// byte-for-byte unchanged; a test without the placeholder passes through
/// as-is.
pub fn inject_input(test: &str, input: &str) -> String {
    test.replacen(INPUT_PLACEHOLDER, input, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_placeholder() {
        let test = "let data = read_lines \"INPUT_DATA\" in run data";
        assert_eq!(
            inject_input(test, "1721\n979\n366"),
            "let data = read_lines \"1721\n979\n366\" in run data"
        );
    }

    #[test]
    fn no_placeholder_is_a_noop() {
        let test = "let () = Test.run ()";
        assert_eq!(inject_input(test, "anything at all"), test);
    }

    #[test]
    fn only_first_occurrence_is_replaced() {
        let test = "INPUT_DATA and then INPUT_DATA again";
        assert_eq!(inject_input(test, "42"), "42 and then INPUT_DATA again");
    }

    #[test]
    fn input_containing_the_token_is_not_reprocessed() {
        let test = "before INPUT_DATA after";
        assert_eq!(
            inject_input(test, "INPUT_DATA"),
            "before INPUT_DATA after"
        );
    }

    #[test]
    fn empty_input_erases_the_token() {
        assert_eq!(inject_input("xINPUT_DATAy", ""), "xy");
    }
}
