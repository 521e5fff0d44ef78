//! Add-on message translations.

use crate::host::TranslationSource;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Message catalog for the host's current language.
///
/// When the host cannot provide a catalog every message is shown untranslated.
#[derive(Debug, Clone, Default)]
pub struct Translations {
    catalog: HashMap<String, String>,
}

impl Translations {
    /// Load the catalog from the host. Failure is logged and never fatal.
    pub fn init(source: &dyn TranslationSource) -> Self {
        match source.load_catalog() {
            Ok(catalog) => {
                debug!(messages = catalog.len(), "Loaded translations");
                Self { catalog }
            }
            Err(e) => {
                warn!(
                    error = %e,
                    "Unable to initialise translations. This may be because the add-on is running from a scratchpad"
                );
                Self::untranslated()
            }
        }
    }

    /// A catalog that returns every message unchanged.
    pub fn untranslated() -> Self {
        Self::default()
    }

    pub fn tr<'a>(&'a self, msgid: &'a str) -> &'a str {
        self.catalog.get(msgid).map(String::as_str).unwrap_or(msgid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MockHost;

    #[test]
    fn test_translation_lookup() {
        let host = MockHost::new().with_catalog(HashMap::from([(
            "Unmute".to_string(),
            "Увімкнути звук".to_string(),
        )]));
        let translations = Translations::init(&host);
        assert_eq!(translations.tr("Unmute"), "Увімкнути звук");
        assert_eq!(translations.tr("Other"), "Other");
    }

    #[test]
    fn test_failed_load_degrades_to_msgids() {
        let translations = Translations::init(&MockHost::new());
        assert_eq!(translations.tr("Unmute"), "Unmute");
    }
}
