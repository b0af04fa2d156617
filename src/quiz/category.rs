use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: &'static str,
    pub name: &'static str,
}

pub const CATEGORIES: &[Category] = &[
    Category { id: "programming", name: "Programming" },
    Category { id: "computer_science", name: "Computer Science" },
    Category { id: "web_dev", name: "Web Development" },
    Category { id: "data_science", name: "Data Science" },
    Category { id: "devops", name: "DevOps" },
    Category { id: "cloud", name: "Cloud Computing" },
    Category { id: "security", name: "Cybersecurity" },
    Category { id: "databases", name: "Databases" },
    Category { id: "networking", name: "Networking" },
    Category { id: "mobile_dev", name: "Mobile Development" },
];

pub fn category_name(id: &str) -> Option<&'static str> {
    CATEGORIES
        .iter()
        .find(|category| category.id == id)
        .map(|category| category.name)
}

pub fn topics() -> Vec<&'static str> {
    CATEGORIES.iter().map(|category| category.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_ids_resolve() {
        assert_eq!(category_name("web_dev"), Some("Web Development"));
        assert_eq!(category_name("security"), Some("Cybersecurity"));
    }

    #[test]
    fn lookup_is_exact() {
        assert_eq!(category_name("Programming"), None);
        assert_eq!(category_name(""), None);
        assert_eq!(category_name("web-dev"), None);
    }

    #[test]
    fn topics_keep_table_order() {
        let topics = topics();
        assert_eq!(topics.len(), CATEGORIES.len());
        assert_eq!(topics.first(), Some(&"Programming"));
        assert_eq!(topics.last(), Some(&"Mobile Development"));
    }
}
