//! Route paths, role homes, and the navbar link table.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session guard redirects to role homes and the navbar renders the link
//! table. `app` declares the matching router segments.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use crate::net::types::Role;

pub const LOGIN: &str = "/login";

pub const ADMIN_PROFESSORS: &str = "/admin/professores";
pub const ADMIN_SUBJECTS: &str = "/admin/materias";
pub const ADMIN_QUESTIONS: &str = "/admin/questoes";
pub const ADMIN_EXAMS: &str = "/admin/avaliacoes";

pub const PROFESSOR_EXAMS: &str = "/professor/avaliacoes";
pub const PROFESSOR_QUESTIONS: &str = "/professor/questoes";
pub const PROFESSOR_ASSISTANT: &str = "/professor/iavalia";

/// Landing view for a role after login or a role mismatch.
pub fn role_home(role: Role) -> &'static str {
    match role {
        Role::Admin => ADMIN_PROFESSORS,
        Role::Professor => PROFESSOR_EXAMS,
    }
}

/// A protected workspace screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    ProfessorExams,
    ProfessorExamNew,
    ProfessorExamEdit,
    ProfessorQuestions,
    ProfessorQuestionNew,
    ProfessorAssistant,
    AdminProfessors,
    AdminSubjects,
    AdminQuestions,
    AdminExams,
    AdminExamNew,
    AdminExamView,
}

impl Screen {
    pub fn required_role(self) -> Role {
        match self {
            Screen::ProfessorExams
            | Screen::ProfessorExamNew
            | Screen::ProfessorExamEdit
            | Screen::ProfessorQuestions
            | Screen::ProfessorQuestionNew
            | Screen::ProfessorAssistant => Role::Professor,
            Screen::AdminProfessors
            | Screen::AdminSubjects
            | Screen::AdminQuestions
            | Screen::AdminExams
            | Screen::AdminExamNew
            | Screen::AdminExamView => Role::Admin,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Screen::ProfessorExams | Screen::AdminExams => "Exams",
            Screen::ProfessorExamNew | Screen::AdminExamNew => "New exam",
            Screen::ProfessorExamEdit => "Edit exam",
            Screen::ProfessorQuestions => "Question registration",
            Screen::ProfessorQuestionNew => "New question",
            Screen::ProfessorAssistant => "IAvalia",
            Screen::AdminProfessors => "Professors",
            Screen::AdminSubjects => "Subjects",
            Screen::AdminQuestions => "Questions",
            Screen::AdminExamView => "Exam",
        }
    }
}

/// One navbar entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub href: &'static str,
    pub icon: &'static str,
}

const PROFESSOR_LINKS: &[NavLink] = &[
    NavLink { label: "Exams", href: PROFESSOR_EXAMS, icon: "fa-file-alt" },
    NavLink { label: "Question registration", href: PROFESSOR_QUESTIONS, icon: "fa-question-circle" },
    NavLink { label: "IAvalia", href: PROFESSOR_ASSISTANT, icon: "fa-robot" },
];

const ADMIN_LINKS: &[NavLink] = &[
    NavLink { label: "Professors", href: ADMIN_PROFESSORS, icon: "fa-user" },
    NavLink { label: "Subjects", href: ADMIN_SUBJECTS, icon: "fa-book" },
    NavLink { label: "Questions", href: ADMIN_QUESTIONS, icon: "fa-question-circle" },
    NavLink { label: "Exams", href: ADMIN_EXAMS, icon: "fa-clipboard-list" },
];

/// Navbar links visible to `role`. The first entry is always the role home.
pub fn nav_links(role: Role) -> &'static [NavLink] {
    match role {
        Role::Admin => ADMIN_LINKS,
        Role::Professor => PROFESSOR_LINKS,
    }
}
