/// Marker the desktop shell appends to its webview user agent.
pub const NATIVE_UA_MARKER: &str = "NBFAPP";

/// Pure check of a user agent string for the shell marker.
pub fn is_native_context(user_agent: &str) -> bool {
    user_agent.contains(NATIVE_UA_MARKER)
}

/// Decides whether native capabilities can be used for this run.
///
/// A direct presence check on the bridge wins when it has an answer. The user agent
/// match only applies when the bridge cannot tell.
#[derive(Debug, Clone)]
pub struct EnvironmentDetector {
    user_agent: String,
}

impl EnvironmentDetector {
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
        }
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn detect(&self, bridge_presence: Option<bool>) -> bool {
        match bridge_presence {
            Some(present) => {
                tracing::debug!("Bridge reported presence = {}", present);
                present
            }
            None => {
                let native = is_native_context(&self.user_agent);
                tracing::debug!(
                    "Bridge presence unknown, user agent match = {} ({})",
                    native,
                    self.user_agent
                );
                native
            }
        }
    }
}
