use chrono::NaiveDate;

use super::interview::{Interview, InterviewKind, InterviewStatus};
use crate::questions::{Question, QuestionKind};

/// The fixed question bank every AI interview draws from
pub fn default_questions() -> Vec<Question> {
    vec![
        Question::new(
            "q1",
            "Tell me about yourself and your professional background.",
            QuestionKind::Behavioral,
            "Introduction",
            120,
        ),
        Question::new(
            "q2",
            "What interests you most about this position?",
            QuestionKind::Behavioral,
            "Motivation",
            90,
        ),
        Question::new(
            "q3",
            "Describe a challenging project you worked on and how you overcame obstacles.",
            QuestionKind::Situational,
            "Problem Solving",
            180,
        ),
        Question::new(
            "q4",
            "How do you stay updated with the latest industry trends and technologies?",
            QuestionKind::Behavioral,
            "Learning",
            90,
        ),
        Question::new(
            "q5",
            "Walk me through your approach to solving a complex technical problem.",
            QuestionKind::Technical,
            "Technical Skills",
            180,
        ),
        Question::new(
            "q6",
            "How do you handle disagreements with team members?",
            QuestionKind::Behavioral,
            "Teamwork",
            120,
        ),
        Question::new(
            "q7",
            "What are your salary expectations and why?",
            QuestionKind::Behavioral,
            "Compensation",
            60,
        ),
    ]
}

/// Interview records served by the catalog
pub fn fixture_interviews() -> Vec<Interview> {
    vec![
        Interview {
            id: "1".to_string(),
            job_id: "1".to_string(),
            job_title: "Senior Frontend Developer".to_string(),
            company: "Systems Limited".to_string(),
            applicant_id: "user1".to_string(),
            applicant_name: Some("Ahmed Hassan".to_string()),
            scheduled_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap_or_default(),
            scheduled_time: "10:00 AM".to_string(),
            duration_minutes: 60,
            status: InterviewStatus::Scheduled,
            kind: InterviewKind::Ai,
            ai_score: None,
            ai_summary: None,
        },
        Interview {
            id: "2".to_string(),
            job_id: "2".to_string(),
            job_title: "Product Designer".to_string(),
            company: "Netsol Technologies".to_string(),
            applicant_id: "user1".to_string(),
            applicant_name: Some("Ayesha Khan".to_string()),
            scheduled_date: NaiveDate::from_ymd_opt(2024, 1, 28).unwrap_or_default(),
            scheduled_time: "2:00 PM".to_string(),
            duration_minutes: 45,
            status: InterviewStatus::Completed,
            kind: InterviewKind::Ai,
            ai_score: Some(87),
            ai_summary: Some(
                "Strong communication skills and good technical knowledge. \
                 Demonstrated problem-solving abilities."
                    .to_string(),
            ),
        },
    ]
}
