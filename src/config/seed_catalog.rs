// ==========================================
// HTU Schedule - initial catalog
// ==========================================
// Static departments / courses / section counts loaded into an
// empty store. Course Arabic names equal the English names.
// ==========================================

/// One course of the initial catalog
#[derive(Debug, Clone, Copy)]
pub struct SeedCourse {
    pub name: &'static str,
    pub sections: u32,
}

/// One department of the initial catalog
#[derive(Debug, Clone, Copy)]
pub struct SeedDepartment {
    pub name: &'static str,
    /// i18n key of the Arabic department name
    pub name_key: &'static str,
    pub courses: &'static [SeedCourse],
}

const fn course(name: &'static str, sections: u32) -> SeedCourse {
    SeedCourse { name, sections }
}

pub const INITIAL_CATALOG: &[SeedDepartment] = &[
    SeedDepartment {
        name: "Computer Science",
        name_key: "dept.computer_science",
        courses: &[
            course("Fundamental of computing", 8),
            course("Software Development Lifecycles", 3),
            course("Website Design & Development", 4),
            course("ACA & Org", 3),
            course("Computing Research Project", 1),
            course("Application Development", 2),
            course("Programming", 12),
            course("Prototyping", 6),
            course("Advanced Programming", 6),
            course("Data Structures & Algorithms", 4),
            course("Managing a Successful Computing Project", 2),
            course("Planning a Computing Project", 6),
            course("Business Intelligence", 2),
            course("Business Process Support", 7),
            course("Games Engine & Scripting", 2),
            course("Systems Analysis & Design", 4),
            course("ERP Systems", 4),
            course("Operating Systems", 4),
            course("Systems Programming", 3),
            course("Database Programming", 3),
        ],
    },
    SeedDepartment {
        name: "Cyber Security",
        name_key: "dept.cyber_security",
        courses: &[
            course("Security", 6),
            course("Ethical Hacking", 1),
            course("Cryptography", 2),
            course("Networking", 12),
            course("Network Security", 2),
            course("Penetration Testing", 2),
            course("Forensics", 2),
            course("Information Security Management", 1),
            course("Risk Analysis & Systems Testing", 2),
            course("Secure Coding", 1),
        ],
    },
    SeedDepartment {
        name: "Data Science & AI",
        name_key: "dept.data_science",
        courses: &[
            course("Database Design & Development", 3),
            course("Principles of Data Science and Computing Systems", 2),
            course("Data Science Programming", 1),
            course("Machine Learning", 2),
            course("Data Analytics", 3),
            course("Artificial Intelligence & Intelligent Systems", 4),
            course("Natural Language Processing", 2),
            course("Data Visualization", 2),
            course("Big Data Analytics and Visualization", 2),
            course("Data Mining", 2),
            course("Deep Learning", 4),
            course("Modeling and Simulation", 1),
            course("Optimization Theory", 2),
            course("Applied Analytical Models", 2),
            course("Game Design", 2),
            course("Creative Games Development", 2),
            course("Games Engine", 2),
            course("Advanced Scripting for Games", 2),
            course("Professional Practice", 2),
            course("Math for Computing", 2),
            course("Discrete Math", 2),
        ],
    },
    SeedDepartment {
        name: "Common Courses",
        name_key: "dept.common_courses",
        courses: &[
            course("IoT", 2),
            course("Cloud Computing", 2),
            course("Sys Admin", 2),
            course(".NET", 1),
            course("React", 1),
            course("Gen. AI", 2),
            course("Block Chain", 1),
            course("BioInformatics", 1),
        ],
    },
];

/// (departments, courses, sections) of the initial catalog
pub fn catalog_totals() -> (usize, usize, usize) {
    let courses: usize = INITIAL_CATALOG.iter().map(|d| d.courses.len()).sum();
    let sections: usize = INITIAL_CATALOG
        .iter()
        .flat_map(|d| d.courses.iter())
        .map(|c| c.sections as usize)
        .sum();
    (INITIAL_CATALOG.len(), courses, sections)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_shape() {
        let (depts, courses, sections) = catalog_totals();
        assert_eq!(depts, 4);
        assert_eq!(courses, 20 + 10 + 21 + 8);
        assert_eq!(sections, 175);
    }

    #[test]
    fn test_every_course_has_sections() {
        assert!(INITIAL_CATALOG
            .iter()
            .flat_map(|d| d.courses.iter())
            .all(|c| c.sections >= 1));
    }
}
