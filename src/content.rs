use crate::section::SectionId;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExperienceEntry {
    pub role: &'static str,
    pub company: &'static str,
    pub period: &'static str,
    pub description: &'static str,
    pub achievements: Vec<&'static str>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EducationEntry {
    pub degree: &'static str,
    pub school: &'static str,
    pub period: &'static str,
    pub highlights: Vec<&'static str>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub tech: &'static str,
    pub source_link: &'static str,
    pub live_link: Option<&'static str>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Profile {
    pub name: &'static str,
    pub headline_accent: &'static str,
    pub headline_rest: &'static str,
    pub tagline: &'static str,
    pub about: &'static str,
    pub what_i_do: Vec<&'static str>,
    pub tech_stack: Vec<&'static str>,
    pub email: &'static str,
    pub linkedin: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContactDetails {
    pub email: &'static str,
    pub github_handle: &'static str,
    pub github_link: &'static str,
    pub linkedin_handle: &'static str,
    pub linkedin_link: &'static str,
    pub phone: Option<&'static str>,
    pub address: Option<&'static str>,
}

/// Everything the page displays. Built once, never mutated, never validated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StaticContentStore {
    pub profile: Profile,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub projects: Vec<ProjectEntry>,
    pub skills: Vec<&'static str>,
    pub contact: ContactDetails,
}

impl Default for StaticContentStore {
    fn default() -> Self {
        Self::portfolio()
    }
}

impl StaticContentStore {
    pub fn section_order(&self) -> [SectionId; 6] {
        SectionId::ALL
    }

    pub fn portfolio() -> Self {
        Self {
            profile: Profile {
                name: "Baljeet Singh",
                headline_accent: "Full Stack",
                headline_rest: "Developer",
                tagline: "Building the future of web & mobile applications",
                about: "I am Baljeet Singh, passionate about software development with expertise in MERN stack, Flutter, AWS, and more. I thrive on solving complex problems and building impactful applications.",
                what_i_do: vec![
                    "Full Stack Development",
                    "Mobile App Development",
                    "Cloud Architecture",
                    "Third Party Integrations",
                ],
                tech_stack: vec![
                    "MERN Stack",
                    "Flutter",
                    "AWS & Firebase",
                    "Docker & Kubernetes",
                ],
                email: "baljeetsinghoriginal@gmail.com",
                linkedin: "https://www.linkedin.com/in/baljeet~",
            },
            experience: vec![
                ExperienceEntry {
                    role: "Software Development Engineer",
                    company: "Assetplus, Chennai",
                    period: "January 2022 - Present",
                    description: "Worked on diverse projects, integrating APIs, developing dashboards, and enhancing mobile/web applications.",
                    achievements: vec![
                        "Integrated Insurance Products (Care & Nivabupa) in App/Web",
                        "Developed Ledger System with ICICI APIs using 2FA Auth.",
                        "Created Analytics Dashboards with AWS Cloudwatch and Grafana",
                        "Implemented Maker-Checker System with Google Authenticator",
                        "Integrated APIs for MFC CAS, ICICI Payments, and more",
                    ],
                },
                ExperienceEntry {
                    role: "Fellow",
                    company: "Hyperverge Academy, Remote",
                    period: "March 2021 - August 2021",
                    description: "Completed fellowship in Full-Stack Development, gaining hands-on project experience.",
                    achievements: vec![
                        "Built full-stack projects demonstrating MERN stack proficiency",
                        "Enhanced teamwork and problem-solving skills",
                    ],
                },
            ],
            education: vec![
                EducationEntry {
                    degree: "Bachelor of Computer Applications",
                    school: "Rabindranath Tagore University",
                    period: "June 2021 - May 2024",
                    highlights: vec!["Focused on core software development concepts"],
                },
                EducationEntry {
                    degree: "Diploma in Web and Software Development",
                    school: "Navgurukul, Himachal Pradesh",
                    period: "August 2020 - February 2021",
                    highlights: vec![
                        "Developed web applications and enhanced coding skills",
                        "Mentored 22 students, served as Discipline & Placement Coordinator",
                    ],
                },
            ],
            projects: vec![
                ProjectEntry {
                    name: "Social App For Developers",
                    description: "A social platform where developers can communicate, including authentication, profiles, and forums.",
                    tech: "React.js, Node.js, Express.js, MongoDB, JWT",
                    source_link: "https://github.com/Baljeet-Singh-Original/BaljeetVerse-Social-Plateform",
                    live_link: Some("https://tech-media-platform-ui.onrender.com"),
                },
                ProjectEntry {
                    name: "Bus-Booking Website",
                    description: "A platform for booking bus tickets with seat selection and easy checkout.",
                    tech: "React.js, Node.js, Express.js, MongoDB, JWT",
                    source_link: "https://github.com/Baljeet-Singh-Original/Bus-Booking-Project",
                    live_link: None,
                },
            ],
            skills: vec![
                "Typescript (MERN)",
                "Python & C++",
                "MongoDB Aggregation",
                "Flutter",
                "AWS",
                "Appsmith",
                "Docker",
                "mWeb",
                "Reconciliation",
                "2FA Authentication",
                "Cryptography",
                "TS NPM Library",
                "Deeplinks",
            ],
            contact: ContactDetails {
                email: "baljeetsinghoriginal@gmail.com",
                github_handle: "Baljeet-Singh-Original",
                github_link: "https://github.com/Baljeet-Singh-Original",
                linkedin_handle: "baljeet-singh-original",
                linkedin_link: "https://www.linkedin.com/in/baljeet~/",
                phone: None,
                address: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn portfolio_has_every_collection_populated() {
        let store = StaticContentStore::portfolio();

        assert_eq!(store.experience.len(), 2);
        assert_eq!(store.education.len(), 2);
        assert_eq!(store.projects.len(), 2);
        assert_eq!(store.skills.len(), 13);
        assert_eq!(store.section_order(), SectionId::ALL);
    }

    #[test]
    fn only_some_projects_have_live_links() {
        let store = StaticContentStore::portfolio();
        let live: Vec<_> = store
            .projects
            .iter()
            .filter_map(|project| project.live_link)
            .collect();

        assert_eq!(live, vec!["https://tech-media-platform-ui.onrender.com"]);
    }
}
