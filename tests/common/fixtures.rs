//! Test fixtures and constants.

use serde_json::{json, Value};

/// Template ids in the embedded catalog
pub mod templates {
    pub const DEFAULT: &str = "1";
    pub const TIMELINE: &str = "5";
    pub const SINGLE_COLUMN: &str = "9";
    pub const ALL: [&str; 16] = [
        "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12", "13", "14", "15", "16",
    ];
}

/// Smallest valid résumé document
pub fn minimal_resume() -> Value {
    json!({
        "name": "Jane Doe",
        "experience": [],
        "education": [],
        "skills": ["SQL"]
    })
}

/// A résumé with every section filled in
pub fn full_resume() -> Value {
    json!({
        "name": "Jane Doe",
        "title": "Senior Software Engineer",
        "summary": "Engineer with ten years of backend experience.",
        "contact": {
            "email": "jane.doe@example.com",
            "phone": "+1 555 0100",
            "location": "Berlin, Germany",
            "website": "https://janedoe.dev"
        },
        "experience": [
            {
                "company": "Acme Corp",
                "position": "Senior Engineer",
                "from": "2020",
                "to": "Present",
                "description": "Platform team lead.",
                "highlights": ["Cut build times by half", "Mentored four engineers"]
            },
            {
                "company": "Globex",
                "position": "Engineer",
                "from": "2016",
                "to": "2020",
                "description": "Backend services for billing."
            }
        ],
        "education": [
            {
                "institution": "TU Berlin",
                "degree": "MSc",
                "area": "Computer Science",
                "from": "2014",
                "to": "2016",
                "courses": [{ "subject": "Distributed Systems", "mark": "1.0" }]
            }
        ],
        "skills": ["Rust", "SQL", "Kubernetes"],
        "languages": [
            { "name": "English", "level": "Native" },
            { "name": "German", "level": "C1" }
        ],
        "certifications": [
            { "title": "CKA", "issuer": "CNCF", "date": "2022" }
        ],
        "awards": [
            { "title": "Engineer of the Year", "awarder": "Acme Corp", "date": "2023" }
        ],
        "interests": [
            { "name": "Climbing", "keywords": ["bouldering"] }
        ],
        "references": [
            { "name": "John Smith", "position": "CTO", "company": "Acme Corp" }
        ]
    })
}

/// Body for `/api/generate-pdf` and `/api/preview`
pub fn export_request(resume: Value, template_id: &str) -> Value {
    json!({
        "resumeData": resume,
        "templateId": template_id
    })
}
