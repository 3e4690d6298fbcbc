use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub name: &'static str,
    pub email: &'static str,
    pub role: &'static str,
    pub status: &'static str,
    pub courses_enrolled: u32,
    pub progress: u8,
    pub joined_date: &'static str,
    pub location: &'static str,
}

/// Placeholder directory shown until user management exists.
pub fn placeholder_users() -> Vec<User> {
    vec![
        User {
            id: 1,
            name: "Alice Johnson",
            email: "alice.johnson@example.com",
            role: "Student",
            status: "Active",
            courses_enrolled: 12,
            progress: 85,
            joined_date: "2024-01-15",
            location: "New York, USA",
        },
        User {
            id: 2,
            name: "Bob Smith",
            email: "bob.smith@example.com",
            role: "Instructor",
            status: "Active",
            courses_enrolled: 3,
            progress: 92,
            joined_date: "2023-11-22",
            location: "London, UK",
        },
        User {
            id: 3,
            name: "Carol Martinez",
            email: "carol.martinez@example.com",
            role: "Student",
            status: "Pending",
            courses_enrolled: 7,
            progress: 60,
            joined_date: "2024-03-08",
            location: "Madrid, Spain",
        },
        User {
            id: 4,
            name: "David Wilson",
            email: "david.wilson@example.com",
            role: "Admin",
            status: "Active",
            courses_enrolled: 25,
            progress: 100,
            joined_date: "2023-06-10",
            location: "Sydney, Australia",
        },
    ]
}
