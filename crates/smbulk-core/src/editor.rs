//! Field editor: choose catalog fields and collect typed values.

use tracing::{debug, warn};

use crate::console::{self, Console};
use crate::error::CoreError;
use crate::fields::{self, CATALOG, FieldKind, FieldSpec};
use crate::patch::{FieldValue, PatchMap};

/// Menu lines: `"{i}. {name} ({kind})"`, two per line.
pub fn render_menu() -> Vec<String> {
    let cells: Vec<String> = CATALOG
        .iter()
        .enumerate()
        .map(|(idx, spec)| format!("{}. {}", idx + 1, spec.label()))
        .collect();
    console::two_columns(&cells)
}

/// Resolve comma-separated menu numbers.
///
/// Unparseable or out-of-range tokens are returned separately, in input
/// order, so the caller can report them.
pub fn parse_selection(input: &str) -> (Vec<&'static FieldSpec>, Vec<String>) {
    let mut chosen = Vec::new();
    let mut rejected = Vec::new();
    for token in input.split(',') {
        let token = token.trim();
        match token.parse::<usize>().ok().and_then(fields::by_number) {
            Some(spec) => chosen.push(spec),
            None => rejected.push(token.to_owned()),
        }
    }
    (chosen, rejected)
}

fn value_prompt(spec: &FieldSpec) -> String {
    match spec.kind {
        FieldKind::StringArray => "Enter values".to_owned(),
        FieldKind::Boolean | FieldKind::Integer => {
            format!("Enter value for {} ({})", spec.name, spec.kind)
        }
        FieldKind::String => format!("Enter value for {}", spec.name),
    }
}

fn show_hint<C: Console>(console: &mut C, spec: &FieldSpec) {
    let Some(hint) = spec.hint else {
        return;
    };
    if let Some(example) = hint.example {
        console.say(&format!("Example: {example}"));
    }
    console.say(&format!("{}: {}", hint.label, hint.options.join(", ")));
}

/// Print the menu, read the selection and prompt for each value.
///
/// Bad menu numbers and bad integers are reported and skipped; they never
/// abort the edit.
pub fn edit_fields<C: Console>(console: &mut C) -> Result<PatchMap, CoreError> {
    console.say("");
    console.say(
        "Please choose the fields you want to configure (enter the numbers separated by commas):",
    );
    for line in render_menu() {
        console.say(&line);
    }

    console.say("");
    let input =
        console.prompt("Enter the numbers of the options you want to configure (e.g., 1,3,5)")?;
    let (chosen, rejected) = parse_selection(&input);
    for token in &rejected {
        console.warn(&format!("Invalid option number: {token}"));
    }

    let mut patch = PatchMap::new();
    for spec in chosen {
        if spec.kind == FieldKind::StringArray {
            console.say("");
            console.say(&format!("Enter values for {} (comma-separated):", spec.name));
        }
        show_hint(console, spec);

        let raw = console.prompt(&value_prompt(spec))?;
        match FieldValue::parse(spec.kind, &raw) {
            Ok(value) => {
                debug!(field = spec.name, %value, "field value accepted");
                patch.insert(spec.name, value);
            }
            Err(err) => {
                warn!(field = spec.name, %err, "field value rejected");
                console.warn(&format!("Invalid input for option {}. Skipping.", spec.name));
            }
        }
    }

    Ok(patch)
}

/// The confirmation block printed before the bulk run.
pub fn render_summary(patch: &PatchMap) -> Vec<String> {
    let mut lines = vec![
        String::new(),
        console::rule(),
        "Configuration to be applied:".to_owned(),
        console::rule(),
    ];
    lines.extend(patch.iter().map(|(name, value)| format!("{name}: {value}")));
    lines.push(console::rule());
    lines
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn menu_pairs_entries() {
        let menu = render_menu();
        assert_eq!(menu.len(), CATALOG.len().div_ceil(2));
        assert!(menu[0].starts_with("1. access_key (string)"));
        assert!(menu[0].ends_with("2. aws_account_id (string)"));
        assert_eq!(menu.last().unwrap(), "55. versionSshFallback (true/false)");
    }

    #[test]
    fn selection_reports_bad_tokens() {
        let (chosen, rejected) = parse_selection(" 1, x,3 ,99,0");
        let names: Vec<_> = chosen.iter().map(|s| s.name).collect();
        assert_eq!(names, ["access_key", "batchConfigRetrieval"]);
        assert_eq!(rejected, ["x", "99", "0"]);
    }

    #[test]
    fn prompts_follow_kind() {
        assert_eq!(
            value_prompt(fields::by_name("skipRoute").unwrap()),
            "Enter value for skipRoute (true/false)"
        );
        assert_eq!(
            value_prompt(fields::by_name("serverAliveInterval").unwrap()),
            "Enter value for serverAliveInterval (integer)"
        );
        assert_eq!(
            value_prompt(fields::by_name("tenant").unwrap()),
            "Enter value for tenant"
        );
        assert_eq!(
            value_prompt(fields::by_name("limitRegions").unwrap()),
            "Enter values"
        );
    }

    #[derive(Default)]
    struct Transcript(Vec<String>);

    impl Console for Transcript {
        fn prompt(&mut self, _message: &str) -> std::io::Result<String> {
            Err(std::io::ErrorKind::UnexpectedEof.into())
        }

        fn prompt_secret(&mut self, _message: &str) -> std::io::Result<secrecy::SecretString> {
            Err(std::io::ErrorKind::UnexpectedEof.into())
        }

        fn say(&mut self, line: &str) {
            self.0.push(line.to_owned());
        }
    }

    #[test]
    fn hints_use_their_own_heading() {
        let mut out = Transcript::default();
        show_hint(&mut out, fields::by_name("serverCertSecurity").unwrap());
        assert_eq!(out.0, ["Options: VERIFY_NONE, VERIFY_HOSTNAME, VERIFY_ALL"]);

        let mut out = Transcript::default();
        show_hint(&mut out, fields::by_name("limitRegions").unwrap());
        assert_eq!(out.0[0], "Example: us-east-1,us-east-2,us-west-1,us-west-2");
        assert!(out.0[1].starts_with("Available regions: us-east-1, us-east-2"));

        let mut out = Transcript::default();
        show_hint(&mut out, fields::by_name("tenant").unwrap());
        assert!(out.0.is_empty());
    }

    #[test]
    fn summary_is_framed() {
        let mut patch = PatchMap::new();
        patch.insert("retrievalMethod", FieldValue::String("FromDevice".into()));
        patch.insert(
            "limitRegions",
            FieldValue::StringArray(vec!["us-east-1".into(), "us-west-2".into()]),
        );

        let lines = render_summary(&patch);
        assert_eq!(
            lines,
            vec![
                String::new(),
                "=".repeat(60),
                "Configuration to be applied:".into(),
                "=".repeat(60),
                "retrievalMethod: FromDevice".into(),
                "limitRegions: us-east-1, us-west-2".into(),
                "=".repeat(60),
            ]
        );
    }
}
