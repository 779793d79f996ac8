use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KnowledgeCategory {
    Quran,
    #[serde(rename = "Tafsir/Hadith")]
    TafsirHadith,
    #[serde(rename = "Islamic Book")]
    IslamicBook,
}

/// Minutes of study against a fixed daily target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeQuest {
    pub id: String,
    pub title: String,
    pub category: KnowledgeCategory,
    pub target_minutes: u32,
    #[serde(default)]
    pub current_minutes: u32,
    #[serde(default)]
    pub reward_claimed: bool,
}

impl KnowledgeQuest {
    fn new(id: &str, title: &str, category: KnowledgeCategory, target_minutes: u32) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            category,
            target_minutes,
            current_minutes: 0,
            reward_claimed: false,
        }
    }

    pub fn seeds() -> Vec<KnowledgeQuest> {
        vec![
            Self::new("quran", "Quran Recitation", KnowledgeCategory::Quran, 15),
            Self::new("tafsir", "Tafsir & Hadith", KnowledgeCategory::TafsirHadith, 15),
            Self::new("book", "Islamic Book Reading", KnowledgeCategory::IslamicBook, 20),
        ]
    }

    pub fn is_completed(&self) -> bool {
        self.current_minutes >= self.target_minutes
    }

    /// Progress fraction 0.0 .. 1.0.
    pub fn fraction(&self) -> f64 {
        if self.target_minutes == 0 {
            return 1.0;
        }
        (self.current_minutes as f64 / self.target_minutes as f64).min(1.0)
    }
}
