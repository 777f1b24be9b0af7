//! Parse command: validate a secret reference

use anyhow::{Context, Result};
use clap::Args;
use secretsmanager_core::SecretReference;

#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Reference of the form <provider>:<secret-id>:<secret-key>
    pub reference: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ParseArgs) -> Result<()> {
    let reference = SecretReference::parse(&args.reference).context("Invalid secret reference")?;
    println!("{}", render(&reference, args.json)?);
    Ok(())
}

fn render(reference: &SecretReference, json: bool) -> Result<String> {
    if json {
        return serde_json::to_string(reference).context("Failed to serialize reference");
    }

    Ok(format!(
        "provider:   {}\nsecret id:  {}\nsecret key: {}",
        reference.provider, reference.secret_id, reference.secret_key
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secretsmanager_core::ProviderKind;

    #[test]
    fn test_render_json() {
        let reference = SecretReference::new(ProviderKind::EnvJson, "SECRETS", "HOST");
        assert_eq!(
            render(&reference, true).unwrap(),
            r#"{"provider":"envjson","secret_id":"SECRETS","secret_key":"HOST"}"#
        );
    }

    #[test]
    fn test_render_text() {
        let reference = SecretReference::new(ProviderKind::Aws, "prod/db", "password");
        let text = render(&reference, false).unwrap();
        assert!(text.contains("provider:   aws"));
        assert!(text.contains("secret id:  prod/db"));
        assert!(text.contains("secret key: password"));
    }

    #[test]
    fn test_run_rejects_plain_value() {
        let err = run(ParseArgs {
            reference: "not-a-reference".to_string(),
            json: false,
        })
        .unwrap_err();
        assert!(err.to_string().contains("Invalid secret reference"));
    }
}
