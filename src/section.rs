use std::{fmt, str::FromStr};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionId {
    #[default]
    Home,
    About,
    Experience,
    Projects,
    Skills,
    Contact,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown section id `{0}`")]
pub struct UnknownSection(pub String);

impl SectionId {
    /// Navigation order, top of the page first.
    pub const ALL: [SectionId; 6] = [
        Self::Home,
        Self::About,
        Self::Experience,
        Self::Projects,
        Self::Skills,
        Self::Contact,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::About => "about",
            Self::Experience => "experience",
            Self::Projects => "projects",
            Self::Skills => "skills",
            Self::Contact => "contact",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::About => "About",
            Self::Experience => "Experience",
            Self::Projects => "Projects",
            Self::Skills => "Skills",
            Self::Contact => "Contact",
        }
    }

    pub fn anchor(self) -> String {
        format!("#{}", self.as_str())
    }

    pub fn position(self) -> usize {
        Self::ALL
            .iter()
            .position(|section| *section == self)
            .unwrap_or(Self::ALL.len())
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionId {
    type Err = UnknownSection;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|section| section.as_str() == trimmed)
            .ok_or_else(|| UnknownSection(trimmed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_section_is_home() {
        assert_eq!(SectionId::default(), SectionId::Home);
        assert_eq!(SectionId::ALL[0], SectionId::default());
    }

    #[test]
    fn ids_parse_back_to_their_section() {
        for section in SectionId::ALL {
            assert_eq!(section.as_str().parse::<SectionId>(), Ok(section));
        }
        assert_eq!(" skills ".parse::<SectionId>(), Ok(SectionId::Skills));
    }

    #[test]
    fn unknown_or_miscased_ids_are_rejected() {
        assert_eq!(
            "Projects".parse::<SectionId>(),
            Err(UnknownSection("Projects".to_string()))
        );
        assert!("".parse::<SectionId>().is_err());
        assert!("footer".parse::<SectionId>().is_err());
    }

    #[test]
    fn anchors_and_labels_follow_ids() {
        assert_eq!(SectionId::Experience.anchor(), "#experience");
        assert_eq!(SectionId::Contact.label(), "Contact");
        assert_eq!(SectionId::Projects.position(), 3);
    }
}
