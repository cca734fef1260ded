//! Story chapters and the choices they offer.

use serde::{Deserialize, Serialize};

use crate::domain::personality::TraitDelta;

/// One option in a chapter; choosing it applies `impact` to the traits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryChoice {
    pub text: String,
    #[serde(default)]
    pub impact: TraitDelta,
}

/// A narrative chapter of the onboarding story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryScenario {
    pub id: u32,
    pub chapter_title: String,
    pub narrative: String,
    /// Prompt sent to the image model when illustrating the chapter.
    pub visual_prompt: String,
    pub choices: Vec<StoryChoice>,
}

impl StoryScenario {
    pub fn choice(&self, index: usize) -> Option<&StoryChoice> {
        self.choices.get(index)
    }

    pub fn choice_labels(&self) -> impl Iterator<Item = &str> {
        self.choices.iter().map(|c| c.text.as_str())
    }
}
