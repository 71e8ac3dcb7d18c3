use crate::{Catalog, CatalogError, Rule};

/// Opening assistant message of every new conversation.
pub(crate) const WELCOME: &str = "Hello! I'm your AI health assistant. I can provide basic health tips and information. What would you like to know?";

/// Checked before any topic rule.
pub(crate) const GREETINGS: &[&str] = &["hi", "hello", "hey", "howdy", "hola", "greetings"];

pub(crate) const GREETING_RESPONSES: &[&str] = &[
    "Hello! I'm your health assistant. How can I help you today?",
    "Hi there! I can provide health tips and information. What would you like to know?",
    "Hello! I'm here to help with health-related questions. What's on your mind?",
];

pub(crate) const FALLBACK_RESPONSES: &[&str] = &[
    "I'm not sure I understand. Could you rephrase your question about health?",
    "I'm still learning and might not have an answer for that. Try asking about common health topics like diet, exercise, or sleep.",
    "I don't have enough information about that. Could you ask something more specific about health?",
];

// Order matters: the first rule with a matching keyword answers.
pub(crate) fn get() -> Vec<Rule> {
    vec![
        rule! {
            name: "headache",
            keywords: ["headache", "head", "pain", "migraine"],
            response: "Headaches can be caused by dehydration, stress, or lack of sleep. Try drinking water, resting in a dark room, and if persistent, consult with a doctor.",
        },
        rule! {
            name: "cold_flu",
            keywords: ["cold", "flu", "fever", "cough"],
            response: "For cold and flu symptoms, rest, stay hydrated, and consider over-the-counter medications for symptom relief. See a doctor if symptoms worsen or persist beyond a week.",
        },
        rule! {
            name: "sleep",
            keywords: ["sleep", "insomnia", "can't sleep", "tired"],
            response: "Improve sleep by maintaining a regular schedule, avoiding screens before bed, creating a comfortable sleep environment, and limiting caffeine. Persistent issues may require medical attention.",
        },
        rule! {
            name: "diet",
            keywords: ["diet", "nutrition", "eat", "food", "healthy"],
            response: "A balanced diet includes plenty of fruits, vegetables, lean proteins, and whole grains. Stay hydrated and limit processed foods, sugar, and salt intake.",
        },
        rule! {
            name: "exercise",
            keywords: ["exercise", "workout", "fitness", "active"],
            response: "Aim for at least 150 minutes of moderate exercise weekly. Include both cardio and strength training for optimal health. Start slowly and increase intensity gradually.",
        },
        rule! {
            name: "stress",
            keywords: ["stress", "anxiety", "worried", "nervous"],
            response: "Manage stress with mindfulness, deep breathing exercises, regular physical activity, and adequate sleep. Consider meditation or yoga, and seek professional help if needed.",
        },
        rule! {
            name: "hydration",
            keywords: ["water", "hydration", "drink", "thirsty"],
            response: "Stay hydrated by drinking 8-10 glasses of water daily. Increase intake during hot weather, exercise, or illness. Monitor urine color – pale yellow indicates good hydration.",
        },
    ]
}

pub(crate) fn catalog() -> Result<Catalog, CatalogError> {
    Catalog::new(get(), GREETINGS, GREETING_RESPONSES, FALLBACK_RESPONSES)
}
