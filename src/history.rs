use crate::models::GeneratedPrompt;

/// Generated prompts, newest first, plus which one is on display.
///
/// The displayed prompt is held as an id into `entries` rather than as a
/// separate copy, so toggling a favorite is visible through both views.
#[derive(Debug, Default, Clone)]
pub struct HistoryStore {
    entries: Vec<GeneratedPrompt>,
    current: Option<String>,
}

impl HistoryStore {
    pub fn new() -> Self { Self::default() }

    pub fn append(&mut self, entry: GeneratedPrompt) {
        self.entries.insert(0, entry);
    }

    /// Append and put the new entry on display in one step.
    pub fn push_and_select(&mut self, entry: GeneratedPrompt) -> &GeneratedPrompt {
        self.current = Some(entry.id.clone());
        self.append(entry);
        &self.entries[0]
    }

    /// Returns the new favorite state, or `None` when the id is unknown.
    pub fn toggle_favorite(&mut self, id: &str) -> Option<bool> {
        let entry = self.entries.iter_mut().find(|e| e.id == id)?;
        entry.is_favorite = !entry.is_favorite;
        Some(entry.is_favorite)
    }

    pub fn remove(&mut self, id: &str) -> Option<GeneratedPrompt> {
        let idx = self.entries.iter().position(|e| e.id == id)?;
        if self.current.as_deref() == Some(id) {
            self.current = None;
        }
        Some(self.entries.remove(idx))
    }

    /// Puts the entry on display and returns it.
    pub fn select(&mut self, id: &str) -> Option<&GeneratedPrompt> {
        let entry = self.entries.iter().find(|e| e.id == id)?;
        self.current = Some(entry.id.clone());
        Some(entry)
    }

    pub fn get(&self, id: &str) -> Option<&GeneratedPrompt> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn current(&self) -> Option<&GeneratedPrompt> {
        self.current.as_deref().and_then(|id| self.get(id))
    }

    pub fn entries(&self) -> &[GeneratedPrompt] { &self.entries }

    pub fn favorites(&self) -> impl Iterator<Item = &GeneratedPrompt> {
        self.entries.iter().filter(|e| e.is_favorite)
    }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}
