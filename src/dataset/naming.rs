//! Unique output column naming.

use crate::error::NamingError;

/// Highest numeric suffix tried before giving up.
const MAX_SUFFIX: usize = 1000;

/// Generate a name not present in `existing`, of the form `{prefix}_{name}`.
///
/// On collision, a numeric suffix is appended: `{prefix}_{name}_0`,
/// `{prefix}_{name}_1`, and so on.
///
/// # Errors
/// `NamingError::Exhausted` if every suffix up to the limit is taken.
pub fn generate_unique<S: AsRef<str>>(
    name: &str,
    existing: &[S],
    prefix: &str,
) -> Result<String, NamingError> {
    let base = format!("{}_{}", prefix, name);
    let is_taken = |candidate: &str| existing.iter().any(|e| e.as_ref() == candidate);

    if !is_taken(&base) {
        return Ok(base);
    }

    for i in 0..=MAX_SUFFIX {
        let candidate = format!("{}_{}", base, i);
        if !is_taken(&candidate) {
            return Ok(candidate);
        }
    }

    Err(NamingError::Exhausted { name: base })
}
