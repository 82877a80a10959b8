//! ESI route templates.

use crate::error::sync::SyncError;

/// Values substituted into a [`PathTemplate`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathVars {
    pub character_id: i64,
    pub corporation_id: Option<i64>,
    pub division: Option<i32>,
}

impl PathVars {
    pub fn character(character_id: i64) -> Self {
        Self {
            character_id,
            ..Default::default()
        }
    }

    pub fn with_corporation(mut self, corporation_id: Option<i64>) -> Self {
        self.corporation_id = corporation_id;
        self
    }

    pub fn with_division(mut self, division: i32) -> Self {
        self.division = Some(division);
        self
    }

    fn lookup(&self, placeholder: &str) -> Option<String> {
        match placeholder {
            "character_id" => Some(self.character_id.to_string()),
            "corporation_id" => self.corporation_id.map(|id| id.to_string()),
            "division" => self.division.map(|division| division.to_string()),
            _ => None,
        }
    }
}

/// Route with `{character_id}`, `{corporation_id}` and `{division}` placeholders,
/// e.g. `/corporations/{corporation_id}/wallets/{division}/journal/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate(String);

impl PathTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Substitutes every placeholder.
    ///
    /// # Returns
    /// - `Ok(String)` - The expanded path
    /// - `Err(SyncError::UnresolvedPlaceholder)` - A placeholder is unknown or has no value
    pub fn expand(&self, vars: &PathVars) -> Result<String, SyncError> {
        let mut expanded = String::with_capacity(self.0.len());
        let mut rest = self.0.as_str();

        while let Some(start) = rest.find('{') {
            expanded.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            let end = after.find('}').ok_or_else(|| self.unresolved(after))?;
            let placeholder = &after[..end];

            let value = vars
                .lookup(placeholder)
                .ok_or_else(|| self.unresolved(placeholder))?;
            expanded.push_str(&value);

            rest = &after[end + 1..];
        }
        expanded.push_str(rest);

        Ok(expanded)
    }

    fn unresolved(&self, placeholder: &str) -> SyncError {
        SyncError::UnresolvedPlaceholder {
            template: self.0.clone(),
            placeholder: placeholder.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_all_placeholders() {
        let template = PathTemplate::new("/corporations/{corporation_id}/wallets/{division}/journal/");
        let vars = PathVars::character(1)
            .with_corporation(Some(98000001))
            .with_division(3);

        assert_eq!(
            template.expand(&vars).unwrap(),
            "/corporations/98000001/wallets/3/journal/"
        );
    }

    #[test]
    fn path_without_placeholders_is_unchanged() {
        let template = PathTemplate::new("/status/");

        assert_eq!(template.expand(&PathVars::character(1)).unwrap(), "/status/");
    }

    #[test]
    fn missing_value_is_unresolved() {
        let template = PathTemplate::new("/corporations/{corporation_id}/divisions/");

        let result = template.expand(&PathVars::character(2114794365));

        assert!(matches!(
            result,
            Err(SyncError::UnresolvedPlaceholder { placeholder, .. }) if placeholder == "corporation_id"
        ));
    }

    #[test]
    fn unknown_placeholder_is_unresolved() {
        let template = PathTemplate::new("/alliances/{alliance_id}/");

        assert!(template.expand(&PathVars::character(1)).is_err());
    }
}
