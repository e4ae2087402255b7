use std::fmt;

use serde::{Deserialize, Serialize};

use super::Movie;

/// Role under which a person is credited on a movie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConnectionType {
    /// Cast member.
    Actor,
    /// Director.
    Director,
    /// Writer (screenplay, story, novel).
    Writer,
    /// Composer of the score.
    Composer,
    /// Director of photography.
    Cinematographer,
}

impl ConnectionType {
    /// Every role kind, in the order connections are reported.
    pub const ALL: [ConnectionType; 5] = [
        ConnectionType::Actor,
        ConnectionType::Director,
        ConnectionType::Writer,
        ConnectionType::Composer,
        ConnectionType::Cinematographer,
    ];

    /// Upper-case label used in turn messages.
    pub fn label(self) -> &'static str {
        match self {
            ConnectionType::Actor => "ACTOR",
            ConnectionType::Director => "DIRECTOR",
            ConnectionType::Writer => "WRITER",
            ConnectionType::Composer => "COMPOSER",
            ConnectionType::Cinematographer => "CINEMATOGRAPHER",
        }
    }
}

impl fmt::Display for ConnectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A person credited on two movies under the same role.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Connection {
    person_name: String,
    kind: ConnectionType,
}

impl Connection {
    /// Build a connection for `person_name` credited as `kind`.
    pub fn new(person_name: impl Into<String>, kind: ConnectionType) -> Self {
        Self {
            person_name: person_name.into(),
            kind,
        }
    }

    /// Name of the shared person.
    pub fn person_name(&self) -> &str {
        &self.person_name
    }

    /// Role shared on both movies.
    pub fn kind(&self) -> ConnectionType {
        self.kind
    }
}

impl fmt::Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.person_name, self.kind)
    }
}

/// Every shared credit between `a` and `b`, grouped by role kind in
/// [`ConnectionType::ALL`] order. Neither movie is modified.
pub fn find_connections(a: &Movie, b: &Movie) -> Vec<Connection> {
    ConnectionType::ALL
        .into_iter()
        .flat_map(|kind| {
            let theirs = b.credits(kind);
            a.credits(kind)
                .iter()
                .filter(move |name| theirs.contains(*name))
                .map(move |name| Connection::new(name.clone(), kind))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_shared_credits_in_role_order() {
        let heat = Movie::new("Heat", 1995)
            .with_credits(ConnectionType::Actor, ["Al Pacino", "Robert De Niro"])
            .with_credits(ConnectionType::Director, ["Michael Mann"])
            .with_credits(ConnectionType::Composer, ["Elliot Goldenthal"]);
        let other = Movie::new("Collateral", 2004)
            .with_credits(ConnectionType::Composer, ["Elliot Goldenthal"])
            .with_credits(ConnectionType::Director, ["Michael Mann"])
            .with_credits(ConnectionType::Actor, ["Tom Cruise"]);

        let connections = find_connections(&heat, &other);
        assert_eq!(
            connections,
            vec![
                Connection::new("Michael Mann", ConnectionType::Director),
                Connection::new("Elliot Goldenthal", ConnectionType::Composer),
            ]
        );
    }

    #[test]
    fn same_name_in_different_roles_does_not_connect() {
        let a = Movie::new("A", 2000).with_credits(ConnectionType::Writer, ["Jane Doe"]);
        let b = Movie::new("B", 2001).with_credits(ConnectionType::Director, ["Jane Doe"]);

        assert!(find_connections(&a, &b).is_empty());
    }

    #[test]
    fn connection_equality_needs_both_fields() {
        let actor = Connection::new("Clint Eastwood", ConnectionType::Actor);
        let director = Connection::new("Clint Eastwood", ConnectionType::Director);

        assert_ne!(actor, director);
        assert_eq!(actor, Connection::new("Clint Eastwood", ConnectionType::Actor));
        assert_eq!(director.to_string(), "Clint Eastwood (DIRECTOR)");
    }
}
