//! Static reference data consumed by validation and lookups.
//!
//! The carrier and provider tables are fixed per build. They are queried by
//! numeric id or case-insensitive display name and never mutated.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carrier {
    pub id: u32,
    pub name: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Disco {
    pub id: u32,
    pub name: &'static str,
}

pub const CARRIERS: &[Carrier] = &[
    Carrier { id: 1, name: "MTN" },
    Carrier { id: 2, name: "GLO" },
    Carrier { id: 3, name: "9MOBILE" },
    Carrier { id: 4, name: "AIRTEL" },
];

pub const DISCOS: &[Disco] = &[
    Disco { id: 1, name: "Ikeja Electric" },
    Disco { id: 2, name: "Eko Electric" },
    Disco { id: 3, name: "Abuja Electric" },
    Disco { id: 4, name: "Kano Electric" },
    Disco { id: 5, name: "Enugu Electric" },
    Disco { id: 6, name: "Port Harcourt Electric" },
    Disco { id: 7, name: "Ibadan Electric" },
    Disco { id: 8, name: "Kaduna Electric" },
    Disco { id: 9, name: "Jos Electric" },
    Disco { id: 10, name: "Benin Electric" },
];

/// Resolves a user-typed token against the carrier table, accepting either
/// the numeric id or the name in any casing.
pub fn find_carrier(token: &str) -> Option<&'static Carrier> {
    find(CARRIERS, token, |c| c.id, |c| c.name)
}

/// Resolves a user-typed token against the electricity provider table.
pub fn find_disco(token: &str) -> Option<&'static Disco> {
    find(DISCOS, token, |d| d.id, |d| d.name)
}

fn find<T>(
    table: &'static [T],
    token: &str,
    id: impl Fn(&T) -> u32,
    name: impl Fn(&T) -> &'static str,
) -> Option<&'static T> {
    let token = token.trim();
    if let Ok(numeric) = token.parse::<u32>() {
        return table.iter().find(|entry| id(entry) == numeric);
    }
    table
        .iter()
        .find(|entry| name(entry).eq_ignore_ascii_case(token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_carrier_resolves_by_id_and_name() {
        let by_id = find_carrier("1").unwrap();
        let by_name = find_carrier("mtn").unwrap();
        assert_eq!(by_id.id, by_name.id);
        assert_eq!(by_id.name, "MTN");
    }

    #[test]
    fn test_disco_resolves_case_insensitively() {
        let disco = find_disco("IKEJA ELECTRIC").unwrap();
        assert_eq!(disco.id, 1);
        assert_eq!(find_disco("3").unwrap().name, "Abuja Electric");
    }

    #[test]
    fn test_unknown_tokens_are_rejected() {
        assert!(find_carrier("99").is_none());
        assert!(find_carrier("VODAFONE").is_none());
        assert!(find_disco("").is_none());
    }
}
