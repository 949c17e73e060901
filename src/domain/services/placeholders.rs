use serde_json::Value;

/// Built-in placeholder tokens every template can rely on. These are seeded
/// as protected registry rows and can never be deleted.
pub const DEFAULT_PLACEHOLDERS: [(&str, &str); 5] = [
    ("guestName", "Contact name on the reservation"),
    ("eventName", "Name of the event"),
    ("eventDate", "Calendar date of the event"),
    ("sessionTime", "Time of the booked session"),
    ("seats", "Number of reserved seats"),
];

pub fn is_default_placeholder(key: &str) -> bool {
    DEFAULT_PLACEHOLDERS.iter().any(|(k, _)| *k == key)
}

/// Substitutes `{token}` occurrences from a JSON object context. Unknown
/// tokens are left verbatim so a half-filled preview stays readable.
pub fn render(content: &str, context: &Value) -> String {
    let Some(map) = context.as_object() else {
        return content.to_string();
    };

    let mut rendered = content.to_string();
    for (key, value) in map {
        let token = format!("{{{}}}", key);
        let replacement = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        rendered = rendered.replace(&token, &replacement);
    }
    rendered
}
