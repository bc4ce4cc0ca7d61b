use std::convert::Infallible;
use std::str::FromStr;

fn unquote(input: &str) -> &str {
    input
        .trim()
        .trim_matches(|candidate| matches!(candidate, '"' | '\''))
}

/// Quoted text captured from a step.
#[derive(Clone, Debug)]
pub struct StepText(pub String);

impl FromStr for StepText {
    type Err = Infallible;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Ok(Self(unquote(input).to_owned()))
    }
}

/// Quoted comma-separated list captured from a step, such as `"C,de,fr"`.
///
/// Entries are trimmed and empty entries dropped, so `""` is an empty list.
#[derive(Clone, Debug, Default)]
pub struct StepList(pub Vec<String>);

impl FromStr for StepList {
    type Err = Infallible;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let entries = unquote(input)
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(str::to_owned)
            .collect();

        Ok(Self(entries))
    }
}
