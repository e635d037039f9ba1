use crate::LeadSet;

/// Carry a selection across a LeadSet replacement.
///
/// The key survives only if some lead in `leads` still has that company name;
/// otherwise the selection collapses to `None`.
pub fn resolve(previous: Option<&str>, leads: &LeadSet) -> Option<String> {
    let key = previous?;
    leads.contains(key).then(|| key.to_owned())
}
