use std::collections::BTreeMap;

/// Sanitized key/value data sent to the generation endpoint.
pub type GenerationConfig = BTreeMap<String, String>;

/// The fields as currently entered, empty values included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSnapshot {
    entries: Vec<(String, String)>,
}

impl FormSnapshot {
    pub fn new(entries: Vec<(String, String)>) -> Self {
        Self { entries }
    }

    /// Drops empty values. A repeated name keeps its last value.
    pub fn to_config(&self) -> GenerationConfig {
        self.entries
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for FormSnapshot
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Named input fields. Names survive a reset, values do not.
#[derive(Debug, Clone, Default)]
pub struct Form {
    fields: Vec<(String, String)>,
}

impl Form {
    pub fn with_fields<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut form = Self::default();
        for name in names {
            form.declare(name.into());
        }
        form
    }

    fn declare(&mut self, name: String) {
        if !self.fields.iter().any(|(n, _)| *n == name) {
            self.fields.push((name, String::new()));
        }
    }

    /// Sets a field value, adding the field if it is not declared yet.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((name.to_string(), value)),
        }
    }

    pub fn unset(&mut self, name: &str) -> bool {
        match self.fields.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => {
                existing.clear();
                true
            }
            None => false,
        }
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn clear(&mut self) {
        for (_, value) in &mut self.fields {
            value.clear();
        }
    }

    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot::new(self.fields.clone())
    }
}

/// Parses a `name=value` pair as given on the command line.
pub fn parse_field_assignment(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{}'", raw))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("field name is empty in '{}'", raw));
    }
    Ok((name.to_string(), value.to_string()))
}
