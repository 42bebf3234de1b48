//! The sample software-engineering course catalog and the teams every course
//! starts out with.

use chrono::{TimeZone, Utc};

use crate::models::{Course, Student, Team};

struct CourseEntry {
    id: u32,
    name: &'static str,
    description: &'static str,
    semester: u8,
    professor: &'static str,
}

const COURSES: &[CourseEntry] = &[
    CourseEntry {
        id: 1,
        name: "Fundamentos de Programación",
        description: "Curso introductorio a la programación y lógica de algoritmos.",
        semester: 1,
        professor: "Profesor A",
    },
    CourseEntry {
        id: 2,
        name: "Estructuras de Datos",
        description: "Estudio de estructuras de datos fundamentales y su aplicación.",
        semester: 2,
        professor: "Profesor B",
    },
    CourseEntry {
        id: 3,
        name: "Algoritmos y Complejidad",
        description: "Análisis de algoritmos y su complejidad computacional.",
        semester: 3,
        professor: "Profesor C",
    },
    CourseEntry {
        id: 4,
        name: "Ingeniería de Software I",
        description: "Principios y prácticas de la ingeniería de software.",
        semester: 4,
        professor: "Profesor D",
    },
    CourseEntry {
        id: 5,
        name: "Bases de Datos",
        description: "Diseño y gestión de sistemas de bases de datos.",
        semester: 4,
        professor: "Profesor E",
    },
    CourseEntry {
        id: 6,
        name: "Ingeniería de Software II",
        description: "Temas avanzados en ingeniería de software y gestión de proyectos.",
        semester: 5,
        professor: "Profesor F",
    },
    CourseEntry {
        id: 7,
        name: "Arquitectura de Software",
        description: "Diseño de arquitecturas de software robustas y escalables.",
        semester: 6,
        professor: "Profesor G",
    },
    CourseEntry {
        id: 8,
        name: "Proyecto de Grado",
        description: "Desarrollo de un proyecto de software completo.",
        semester: 8,
        professor: "Profesor H",
    },
];

// Every catalog course allows teams of two or three.
const MIN_TEAM_SIZE: usize = 2;
const MAX_TEAM_SIZE: usize = 3;

/// All catalog courses, ordered by id.
pub fn courses() -> Vec<Course> {
    COURSES
        .iter()
        .map(|c| Course {
            id_course: c.id,
            name_course: c.name.to_string(),
            description: c.description.to_string(),
            semester: c.semester,
            status: true,
            professor: c.professor.to_string(),
            min_team_size: MIN_TEAM_SIZE,
            max_team_size: MAX_TEAM_SIZE,
            is_active: true,
        })
        .collect()
}

fn student(id: &str, name: &str, email: &str) -> Student {
    Student {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        ..Student::default()
    }
}

/// The three teams a course is seeded with.
pub fn sample_teams(course_id: u32) -> Vec<Team> {
    let team = |id: &str, name: &str, creator: &str, project: &str, day: u32, members| Team {
        id: id.to_string(),
        name: name.to_string(),
        course_id,
        creator_id: creator.to_string(),
        project_id: project.to_string(),
        members,
        status: None,
        created_at: Utc
            .with_ymd_and_hms(2024, 1, day, 0, 0, 0)
            .single()
            .unwrap_or_default(),
        updated_at: None,
    };

    vec![
        team(
            "1",
            "Equipo Alpha",
            "1",
            "proj1",
            15,
            vec![
                student("1", "Juan Pérez", "juan.perez@udea.edu.co"),
                student("2", "María García", "maria.garcia@udea.edu.co"),
                student("3", "Carlos López", "carlos.lopez@udea.edu.co"),
            ],
        ),
        team(
            "2",
            "Equipo Beta",
            "4",
            "proj2",
            20,
            vec![
                student("4", "Ana Rodríguez", "ana.rodriguez@udea.edu.co"),
                student("5", "Luis Martínez", "luis.martinez@udea.edu.co"),
            ],
        ),
        team(
            "3",
            "Equipo Gamma",
            "6",
            "proj3",
            10,
            vec![
                student("6", "Elena Ruiz", "elena.ruiz@udea.edu.co"),
                student("7", "Jorge Pérez", "jorge.perez@udea.edu.co"),
                student("8", "Roberto Silva", "roberto.silva@udea.edu.co"),
            ],
        ),
    ]
}
