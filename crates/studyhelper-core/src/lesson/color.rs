use serde::{Deserialize, Serialize};

/// Display color for a subject, as 0xRRGGBB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubjectColor(pub u32);

impl SubjectColor {
    pub const DEFAULT: SubjectColor = SubjectColor(0xE0E0E0);

    /// Resolve the color for a lesson title. First matching rule wins.
    pub fn for_title(title: &str) -> Self {
        let title = title.to_lowercase();
        SUBJECT_RULES
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|k| title.contains(k)))
            .map(|(_, color)| *color)
            .unwrap_or(Self::DEFAULT)
    }

    pub fn hex(&self) -> String {
        format!("#{:06X}", self.0)
    }
}

impl std::fmt::Display for SubjectColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.hex())
    }
}

// Order matters: "физ" catches physical education titles before the PE rule.
const SUBJECT_RULES: &[(&[&str], SubjectColor)] = &[
    (&["math", "алгеб", "геом", "матем"], SubjectColor(0xE57373)),
    (&["lit", "лит", "рус"], SubjectColor(0xFFF176)),
    (&["phys", "физ"], SubjectColor(0x64B5F6)),
    (&["bio", "био"], SubjectColor(0x81C784)),
    (&["hist", "ист"], SubjectColor(0xFFB74D)),
    (&["eng", "анг"], SubjectColor(0xBA68C8)),
    (&["pe", "fiz", "спорт"], SubjectColor(0xA1887F)),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_english_and_russian_keywords() {
        assert_eq!(SubjectColor::for_title("Math").hex(), "#E57373");
        assert_eq!(SubjectColor::for_title("Алгебра").hex(), "#E57373");
        assert_eq!(SubjectColor::for_title("Русский язык").hex(), "#FFF176");
        assert_eq!(SubjectColor::for_title("Biology").hex(), "#81C784");
        assert_eq!(SubjectColor::for_title("ИСТОРИЯ").hex(), "#FFB74D");
        assert_eq!(SubjectColor::for_title("English").hex(), "#BA68C8");
        assert_eq!(SubjectColor::for_title("Спорт").hex(), "#A1887F");
    }

    #[test]
    fn first_rule_wins() {
        // Physical education in Russian hits the physics rule first.
        assert_eq!(SubjectColor::for_title("Физкультура").hex(), "#64B5F6");
        assert_eq!(SubjectColor::for_title("Math literature").hex(), "#E57373");
    }

    #[test]
    fn unknown_subject_gets_default() {
        assert_eq!(SubjectColor::for_title("Music"), SubjectColor::DEFAULT);
        assert_eq!(SubjectColor::for_title(""), SubjectColor::DEFAULT);
    }
}
