use serde::Serialize;

/// Static profile returned by the hello-world lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Person {
    pub age: u32,
    pub gender: &'static str,
}

/// Read-only name → person lookup injected into the video router.
pub trait PersonDirectory: Send + Sync {
    fn lookup(&self, name: &str) -> Option<Person>;
}

/// The fixed in-memory directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticPersonDirectory;

const PEOPLE: [(&str, Person); 3] = [
    ("willy", Person { age: 20, gender: "male" }),
    ("wale", Person { age: 33, gender: "male" }),
    ("omolola", Person { age: 28, gender: "female" }),
];

impl PersonDirectory for StaticPersonDirectory {
    fn lookup(&self, name: &str) -> Option<Person> {
        PEOPLE
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, person)| person.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_names_resolve() {
        let dir = StaticPersonDirectory;
        assert_eq!(dir.lookup("willy"), Some(Person { age: 20, gender: "male" }));
        assert_eq!(dir.lookup("wale"), Some(Person { age: 33, gender: "male" }));
        assert_eq!(dir.lookup("omolola"), Some(Person { age: 28, gender: "female" }));
    }

    #[test]
    fn lookup_is_exact() {
        let dir = StaticPersonDirectory;
        assert_eq!(dir.lookup("Willy"), None);
        assert_eq!(dir.lookup("nobody"), None);
        assert_eq!(dir.lookup(""), None);
    }
}
