// src/services/chat.rs

//! Keyword chat assistant.
//!
//! Input is matched against per-intent keyword lists, checked in a fixed
//! order. The first intent with a matching keyword wins. A reply is picked
//! from the response book for that intent.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use crate::error::{AppError, Result};
use crate::models::StudentProfile;

/// What the user is asking about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Greeting,
    Courses,
    Colleges,
    Scholarships,
    Career,
    Roadmaps,
    Exams,
    Ebooks,
    Help,
    Thanks,
    Goodbye,
    Default,
}

impl Intent {
    /// Intents in detection order. `Default` is the fallback and has no keywords.
    pub const DETECTION_ORDER: [Intent; 11] = [
        Intent::Greeting,
        Intent::Courses,
        Intent::Colleges,
        Intent::Scholarships,
        Intent::Career,
        Intent::Roadmaps,
        Intent::Exams,
        Intent::Ebooks,
        Intent::Help,
        Intent::Thanks,
        Intent::Goodbye,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Greeting => "greeting",
            Self::Courses => "courses",
            Self::Colleges => "colleges",
            Self::Scholarships => "scholarships",
            Self::Career => "career",
            Self::Roadmaps => "roadmaps",
            Self::Exams => "exams",
            Self::Ebooks => "ebooks",
            Self::Help => "help",
            Self::Thanks => "thanks",
            Self::Goodbye => "goodbye",
            Self::Default => "default",
        }
    }

    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Self::Greeting => &[
                "hello", "hi", "hey", "good morning", "good afternoon", "good evening",
                "greetings", "namaste",
            ],
            Self::Courses => &[
                "course", "courses", "program", "programs", "study", "learn", "learning",
                "training", "skill", "skills", "certification", "class", "classes",
            ],
            Self::Colleges => &[
                "college", "colleges", "university", "universities", "institution",
                "institutions", "campus", "admission", "admissions", "degree",
                "undergraduate", "postgraduate",
            ],
            Self::Scholarships => &[
                "scholarship", "scholarships", "funding", "financial aid", "grant", "grants",
                "money", "fee", "fees", "cost", "affordable", "cheap", "budget",
            ],
            Self::Career => &[
                "career", "careers", "job", "jobs", "work", "profession", "professional",
                "employment", "future", "salary", "growth", "opportunity", "opportunities",
            ],
            Self::Roadmaps => &[
                "roadmap", "roadmaps", "path", "paths", "plan", "plans", "steps", "guide",
                "guidance", "direction", "journey", "progress", "timeline",
            ],
            Self::Exams => &[
                "exam", "exams", "test", "tests", "competition", "competitive", "entrance",
                "preparation", "prepare", "score", "rank", "qualify", "jee", "neet", "cat",
                "upsc",
            ],
            Self::Ebooks => &[
                "ebook", "ebooks", "book", "books", "pdf", "material", "materials",
                "resource", "resources", "reading", "textbook", "textbooks",
            ],
            Self::Help => &[
                "help", "assist", "assistance", "support", "what can you do",
                "how can you help", "capabilities", "features", "options", "menu",
            ],
            Self::Thanks => &["thank", "thanks", "thank you", "thankyou", "appreciate", "grateful"],
            Self::Goodbye => &[
                "bye", "goodbye", "see you", "farewell", "exit", "quit", "close", "end",
            ],
            Self::Default => &[],
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intent {
    type Err = AppError;

    fn from_str(raw: &str) -> Result<Self> {
        let raw = raw.trim().to_lowercase();
        Self::DETECTION_ORDER
            .into_iter()
            .chain([Self::Default])
            .find(|intent| intent.as_str() == raw)
            .ok_or_else(|| AppError::validation(format!("Unknown intent '{raw}'")))
    }
}

/// Classify a message.
///
/// Single-word keywords must match a whole word ("hi" does not fire on
/// "this"); multi-word keywords match anywhere in the lowercased text.
pub fn detect_intent(input: &str) -> Intent {
    let text = input.to_lowercase();
    let words: Vec<&str> = text.unicode_words().collect();

    let matches = |keyword: &str| {
        if keyword.contains(' ') {
            text.contains(keyword)
        } else {
            words.iter().any(|w| *w == keyword)
        }
    };

    Intent::DETECTION_ORDER
        .into_iter()
        .find(|intent| intent.keywords().iter().any(|&k| matches(k)))
        .unwrap_or(Intent::Default)
}

/// Canned responses and quick suggestions, keyed by intent name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseBook {
    #[serde(default)]
    pub responses: HashMap<String, Vec<String>>,

    /// Suggestion chips; the `initial` entry is shown before any message
    #[serde(default)]
    pub suggestions: HashMap<String, Vec<String>>,
}

impl ResponseBook {
    pub const INITIAL: &'static str = "initial";

    /// Load a response book from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read(path)
            .map_err(|e| AppError::catalog("chat", format!("{}: {}", path.display(), e)))?;
        let book: Self =
            serde_json::from_slice(&content).map_err(|e| AppError::catalog("chat", e))?;
        book.validate()?;
        Ok(book)
    }

    /// The `default` bucket must have at least one response.
    pub fn validate(&self) -> Result<()> {
        let has_default = self
            .responses
            .get(Intent::Default.as_str())
            .is_some_and(|r| !r.is_empty());
        if !has_default {
            return Err(AppError::validation(
                "chat responses need a non-empty 'default' list",
            ));
        }
        Ok(())
    }

    /// Responses for an intent, falling back to the `default` bucket.
    pub fn responses_for(&self, intent: Intent) -> &[String] {
        self.responses
            .get(intent.as_str())
            .filter(|r| !r.is_empty())
            .or_else(|| self.responses.get(Intent::Default.as_str()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// One assistant turn.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub intent: Intent,
    pub text: String,
    pub suggestions: Vec<String>,
}

/// The chat assistant.
#[derive(Debug, Clone)]
pub struct ChatAssistant {
    book: ResponseBook,
}

impl ChatAssistant {
    pub fn new(book: ResponseBook) -> Self {
        Self { book }
    }

    pub fn book(&self) -> &ResponseBook {
        &self.book
    }

    /// Pick a response for the input. The same input always gets the same
    /// response.
    pub fn respond(&self, input: &str, profile: Option<&StudentProfile>) -> Reply {
        let intent = detect_intent(input);
        let seed = message_seed(input);

        let mut text = pick(self.book.responses_for(intent), seed)
            .map(str::to_string)
            .unwrap_or_default();

        if let Some(profile) = profile {
            if let Some(line) = personalized_line(intent, profile) {
                text.push_str("\n\n");
                text.push_str(&line);
            }
            if let Some(first_name) = profile.name.split_whitespace().next() {
                text = format!("{}{}", greeting_prefix(first_name, seed), text);
            }
        }

        log::debug!("Chat intent '{}' for {:?}", intent, input);
        Reply {
            intent,
            text,
            suggestions: self.quick_suggestions(input),
        }
    }

    /// Suggestion chips for the last user input (empty input gives the
    /// initial list).
    pub fn quick_suggestions(&self, last_input: &str) -> Vec<String> {
        let intent = detect_intent(last_input);
        self.book
            .suggestions
            .get(intent.as_str())
            .or_else(|| self.book.suggestions.get(ResponseBook::INITIAL))
            .cloned()
            .unwrap_or_default()
    }
}

/// Stable 32-bit FNV-1a hash of the normalized message.
fn message_seed(input: &str) -> u32 {
    input
        .trim()
        .to_lowercase()
        .bytes()
        .fold(0x811c_9dc5_u32, |hash, byte| {
            (hash ^ u32::from(byte)).wrapping_mul(0x0100_0193)
        })
}

fn pick(options: &[String], seed: u32) -> Option<&str> {
    if options.is_empty() {
        return None;
    }
    options.get(seed as usize % options.len()).map(String::as_str)
}

fn greeting_prefix(first_name: &str, seed: u32) -> String {
    match (seed >> 8) % 4 {
        0 => format!("Hey {first_name}! "),
        1 => format!("{first_name}, "),
        2 => format!("Great question, {first_name}! "),
        _ => format!("Hi {first_name}! "),
    }
}

/// Extra line tailored to the student's studies. Skipped when the profile
/// lacks the fields the line refers to.
fn personalized_line(intent: Intent, profile: &StudentProfile) -> Option<String> {
    let course = Some(profile.course.as_str()).filter(|c| !c.is_empty());
    let college = Some(profile.college.as_str()).filter(|c| !c.is_empty());
    let semester = Some(profile.semester.as_str()).filter(|s| !s.is_empty());

    match intent {
        Intent::Courses => course.map(|course| {
            format!(
                "Based on your {course} background, I can suggest specialized advanced courses that align with your current studies!"
            )
        }),
        Intent::Career => course.zip(college).map(|(course, college)| {
            format!(
                "Given your interest in {course}, here are some career paths that {college} graduates often pursue successfully!"
            )
        }),
        Intent::Colleges => college.map(|college| {
            format!(
                "I notice you're at {college}! I can help you explore transfer options or postgraduate programs that complement your current studies."
            )
        }),
        Intent::Scholarships => semester.zip(course).map(|(semester, course)| {
            format!(
                "With your {semester} progress in {course}, you might be eligible for merit-based scholarships and research grants!"
            )
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book() -> ResponseBook {
        serde_json::from_str(
            r#"{
                "responses": {
                    "greeting": ["Hello there!", "Welcome back!"],
                    "courses": ["We have courses in many fields."],
                    "default": ["Could you rephrase that?"]
                },
                "suggestions": {
                    "initial": ["Explore courses", "Find colleges"],
                    "courses": ["Engineering courses"]
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_detect_intent_order() {
        assert_eq!(detect_intent("Hello, which course is best?"), Intent::Greeting);
        assert_eq!(detect_intent("Which course should I take?"), Intent::Courses);
        assert_eq!(detect_intent("Tell me about NEET"), Intent::Exams);
        assert_eq!(detect_intent("I need financial aid"), Intent::Scholarships);
        assert_eq!(detect_intent("what can you do"), Intent::Help);
        assert_eq!(detect_intent("asdf qwerty"), Intent::Default);
    }

    #[test]
    fn test_single_words_match_whole_words() {
        // "this" contains "hi", "chemistry" contains "hi" too
        assert_eq!(detect_intent("this chemistry thing"), Intent::Default);
        assert_eq!(detect_intent("hi"), Intent::Greeting);
    }

    #[test]
    fn test_response_is_deterministic() {
        let assistant = ChatAssistant::new(book());
        let first = assistant.respond("hey", None);
        let second = assistant.respond("  HEY ", None);
        assert_eq!(first, second);
        assert_eq!(first.intent, Intent::Greeting);
        assert!(book().responses["greeting"].contains(&first.text));
    }

    #[test]
    fn test_unknown_bucket_falls_back_to_default() {
        let assistant = ChatAssistant::new(book());
        let reply = assistant.respond("goodbye", None);
        assert_eq!(reply.intent, Intent::Goodbye);
        assert_eq!(reply.text, "Could you rephrase that?");
        assert_eq!(reply.suggestions, vec!["Explore courses", "Find colleges"]);
    }

    #[test]
    fn test_personalized_reply() {
        let assistant = ChatAssistant::new(book());
        let profile = StudentProfile {
            name: "Priya Sharma".to_string(),
            course: "B.Tech".to_string(),
            ..StudentProfile::default()
        };
        let reply = assistant.respond("any course for me", Some(&profile));
        assert!(reply.text.contains("Priya"));
        assert!(reply.text.contains("Based on your B.Tech background"));
        assert_eq!(reply.suggestions, vec!["Engineering courses"]);
    }

    #[test]
    fn test_book_requires_default() {
        let book: ResponseBook =
            serde_json::from_str(r#"{"responses": {"greeting": ["Hi"]}}"#).unwrap();
        assert!(book.validate().is_err());
    }

    #[test]
    fn test_intent_parse() {
        assert_eq!("Ebooks".parse::<Intent>().unwrap(), Intent::Ebooks);
        assert!("weather".parse::<Intent>().is_err());
    }
}
