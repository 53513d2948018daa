// ── Credentials ──
//
// The account identifier (portal company name) and bearer token live in the
// host's secret store under two fixed keys. These helpers implement the
// configure / update / clear commands and the "prompt for whatever is
// missing" step every portal command starts with.

use secrecy::SecretString;
use tracing::{debug, info};

use crate::error::CoreError;
use crate::host::{InputRequest, Notice, Prompter, SecretStore};

/// Secret-store key for the account identifier.
pub const ACCOUNT_ID_KEY: &str = "account-id";
/// Secret-store key for the API bearer token.
pub const API_TOKEN_KEY: &str = "api-token";

const ACCOUNT_PROMPT: InputRequest<'static> = InputRequest {
    prompt: "LogicMonitor account name (e.g. 'example' for example.logicmonitor.com)",
    placeholder: "example",
    secret: false,
};

const TOKEN_PROMPT: InputRequest<'static> = InputRequest {
    prompt: "LogicMonitor API token (Bearer tokens only, not LMv1)",
    placeholder: "API token",
    secret: true,
};

/// Both secrets needed to talk to a portal.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub account_id: String,
    pub api_token: SecretString,
}

/// Which stored secrets are present, without exposing them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CredentialStatus {
    pub account_id: bool,
    pub api_token: bool,
}

/// Read both secrets; fail if either is missing.
pub fn load<S: SecretStore + ?Sized>(store: &S) -> Result<Credentials, CoreError> {
    let account_id = non_empty(store.get(ACCOUNT_ID_KEY)?).ok_or(CoreError::MissingCredentials {
        what: "account name",
    })?;
    let api_token = non_empty(store.get(API_TOKEN_KEY)?).ok_or(CoreError::MissingCredentials {
        what: "API token",
    })?;
    Ok(Credentials {
        account_id,
        api_token: SecretString::from(api_token),
    })
}

/// Report which secrets are stored.
pub fn status<S: SecretStore + ?Sized>(store: &S) -> Result<CredentialStatus, CoreError> {
    Ok(CredentialStatus {
        account_id: non_empty(store.get(ACCOUNT_ID_KEY)?).is_some(),
        api_token: non_empty(store.get(API_TOKEN_KEY)?).is_some(),
    })
}

/// Load credentials, prompting for (and storing) whichever one is missing.
pub fn ensure<S, P>(store: &S, prompter: &P) -> Result<Credentials, CoreError>
where
    S: SecretStore + ?Sized,
    P: Prompter + ?Sized,
{
    if non_empty(store.get(ACCOUNT_ID_KEY)?).is_none() {
        let account = ask(prompter, &ACCOUNT_PROMPT, "Account name is required")?;
        store.store(ACCOUNT_ID_KEY, &account)?;
        debug!("account name stored");
    }

    if non_empty(store.get(API_TOKEN_KEY)?).is_none() {
        let token = ask(prompter, &TOKEN_PROMPT, "API token is required")?;
        store.store(API_TOKEN_KEY, &token)?;
        debug!("API token stored");
    }

    load(store)
}

/// Prompt for both secrets regardless of what is stored.
///
/// The account name is stored as soon as it is entered, so cancelling the
/// token prompt leaves the new account name in place.
pub fn configure<S, P>(store: &S, prompter: &P) -> Result<(), CoreError>
where
    S: SecretStore + ?Sized,
    P: Prompter + ?Sized,
{
    let account = ask(prompter, &ACCOUNT_PROMPT, "Account name is required")?;
    store.store(ACCOUNT_ID_KEY, &account)?;

    let token = ask(prompter, &TOKEN_PROMPT, "API token is required")?;
    store.store(API_TOKEN_KEY, &token)?;

    info!("credentials configured");
    prompter.notify(Notice::Info, "Configuration successful!");
    Ok(())
}

/// Replace the stored account name.
pub fn update_account<S, P>(store: &S, prompter: &P) -> Result<(), CoreError>
where
    S: SecretStore + ?Sized,
    P: Prompter + ?Sized,
{
    let account = ask(prompter, &ACCOUNT_PROMPT, "Account name update cancelled")?;
    store.store(ACCOUNT_ID_KEY, &account)?;
    prompter.notify(Notice::Info, "Account name updated successfully!");
    Ok(())
}

/// Replace the stored API token.
pub fn update_token<S, P>(store: &S, prompter: &P) -> Result<(), CoreError>
where
    S: SecretStore + ?Sized,
    P: Prompter + ?Sized,
{
    let token = ask(prompter, &TOKEN_PROMPT, "API token update cancelled")?;
    store.store(API_TOKEN_KEY, &token)?;
    prompter.notify(Notice::Info, "API token updated successfully!");
    Ok(())
}

/// Delete both secrets.
pub fn clear_all<S: SecretStore + ?Sized>(store: &S) -> Result<(), CoreError> {
    store.delete(ACCOUNT_ID_KEY)?;
    store.delete(API_TOKEN_KEY)?;
    info!("credentials cleared");
    Ok(())
}

pub fn clear_account<S: SecretStore + ?Sized>(store: &S) -> Result<(), CoreError> {
    store.delete(ACCOUNT_ID_KEY)
}

pub fn clear_token<S: SecretStore + ?Sized>(store: &S) -> Result<(), CoreError> {
    store.delete(API_TOKEN_KEY)
}

// ── Helpers ─────────────────────────────────────────────────────────

fn ask<P: Prompter + ?Sized>(
    prompter: &P,
    request: &InputRequest<'_>,
    missing: &str,
) -> Result<String, CoreError> {
    let value = non_empty(prompter.input(request)?).map(|v| v.trim().to_owned());
    value.ok_or_else(|| CoreError::validation(missing))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;
    use crate::host::MemorySecretStore;
    use crate::testing::ScriptedPrompter;

    #[test]
    fn load_reports_missing_token() {
        let store = MemorySecretStore::with_entries([(ACCOUNT_ID_KEY, "acme")]);
        let err = load(&store).unwrap_err();
        assert!(matches!(
            err,
            CoreError::MissingCredentials { what: "API token" }
        ));
    }

    #[test]
    fn ensure_prompts_only_for_missing_values() {
        let store = MemorySecretStore::with_entries([(ACCOUNT_ID_KEY, "acme")]);
        let prompter = ScriptedPrompter::new().with_inputs([Some("tok")]);

        let creds = ensure(&store, &prompter).unwrap();

        assert_eq!(creds.account_id, "acme");
        assert_eq!(creds.api_token.expose_secret(), "tok");
        assert_eq!(prompter.input_prompts().len(), 1);
        assert_eq!(store.get(API_TOKEN_KEY).unwrap().as_deref(), Some("tok"));
    }

    #[test]
    fn ensure_fails_when_prompt_dismissed() {
        let store = MemorySecretStore::new();
        let prompter = ScriptedPrompter::new().with_inputs([None]);

        let err = ensure(&store, &prompter).unwrap_err();
        assert!(matches!(err, CoreError::Validation { .. }));
        assert!(store.is_empty());
    }

    #[test]
    fn configure_overwrites_both() {
        let store =
            MemorySecretStore::with_entries([(ACCOUNT_ID_KEY, "old"), (API_TOKEN_KEY, "old")]);
        let prompter = ScriptedPrompter::new().with_inputs([Some(" acme "), Some("tok")]);

        configure(&store, &prompter).unwrap();

        let creds = load(&store).unwrap();
        assert_eq!(creds.account_id, "acme");
        assert_eq!(creds.api_token.expose_secret(), "tok");
        assert_eq!(prompter.notices(), [(Notice::Info, "Configuration successful!".to_string())]);
    }

    #[test]
    fn update_token_keeps_account() {
        let store =
            MemorySecretStore::with_entries([(ACCOUNT_ID_KEY, "acme"), (API_TOKEN_KEY, "old")]);
        let prompter = ScriptedPrompter::new().with_inputs([Some("new")]);

        update_token(&store, &prompter).unwrap();

        let creds = load(&store).unwrap();
        assert_eq!(creds.account_id, "acme");
        assert_eq!(creds.api_token.expose_secret(), "new");
    }

    #[test]
    fn clear_individually_and_together() {
        let store =
            MemorySecretStore::with_entries([(ACCOUNT_ID_KEY, "acme"), (API_TOKEN_KEY, "tok")]);

        clear_token(&store).unwrap();
        assert_eq!(
            status(&store).unwrap(),
            CredentialStatus {
                account_id: true,
                api_token: false
            }
        );

        clear_account(&store).unwrap();
        assert!(store.is_empty());

        store.store(ACCOUNT_ID_KEY, "acme").unwrap();
        store.store(API_TOKEN_KEY, "tok").unwrap();
        clear_all(&store).unwrap();
        assert!(store.is_empty());
    }
}
