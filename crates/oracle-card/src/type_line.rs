use oracle_ast::card::TypeLine;

const SUPERTYPES: &[&str] = &["Basic", "Legendary", "Ongoing", "Snow", "World", "Elite", "Host"];

/// Split a printed type line into supertypes, card types and subtypes.
///
/// The subtype list starts after an em dash (or a spaced hyphen in
/// plain-ASCII input). A multi-face line (`A // B`) collects the union of
/// its halves in first-seen order.
pub fn parse_type_line(raw: &str) -> TypeLine {
    let mut line = TypeLine {
        raw: raw.to_string(),
        ..TypeLine::default()
    };
    for half in raw.split(" // ") {
        let (left, right) = match half.split_once('—') {
            Some((l, r)) => (l, Some(r)),
            None => match half.split_once(" - ") {
                Some((l, r)) => (l, Some(r)),
                None => (half, None),
            },
        };
        for word in left.split_whitespace() {
            if SUPERTYPES.contains(&word) {
                push_unique(&mut line.supertypes, word);
            } else {
                push_unique(&mut line.types, word);
            }
        }
        for word in right.into_iter().flat_map(str::split_whitespace) {
            push_unique(&mut line.subtypes, word);
        }
    }
    line
}

fn push_unique(list: &mut Vec<String>, word: &str) {
    if !list.iter().any(|w| w == word) {
        list.push(word.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creature_line() {
        let line = parse_type_line("Legendary Creature — Elf Druid");
        assert_eq!(line.supertypes, vec!["Legendary"]);
        assert_eq!(line.types, vec!["Creature"]);
        assert_eq!(line.subtypes, vec!["Elf", "Druid"]);
    }

    #[test]
    fn ascii_dash_and_no_subtypes() {
        let line = parse_type_line("Artifact Creature - Golem");
        assert_eq!(line.types, vec!["Artifact", "Creature"]);
        assert_eq!(line.subtypes, vec!["Golem"]);

        let line = parse_type_line("Basic Snow Land");
        assert_eq!(line.supertypes, vec!["Basic", "Snow"]);
        assert_eq!(line.types, vec!["Land"]);
        assert!(line.subtypes.is_empty());
    }

    #[test]
    fn split_line_is_merged() {
        let line = parse_type_line("Instant // Sorcery — Adventure");
        assert_eq!(line.types, vec!["Instant", "Sorcery"]);
        assert_eq!(line.subtypes, vec!["Adventure"]);
        assert_eq!(line.raw, "Instant // Sorcery — Adventure");
    }
}
