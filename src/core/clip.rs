//! Clip data shown in the carousel cards.

/// One reviewable clip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clip {
    pub id: String,
    /// Headline burned into the clip (shown large on the card).
    pub title: String,
    /// Suggested post caption.
    pub caption: String,
    /// Length in seconds; `0` when unknown.
    pub duration_secs: u32,
}

impl Clip {
    pub fn new(id: &str, title: &str, caption: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            caption: caption.to_string(),
            duration_secs: 0,
        }
    }

    /// `m:ss`, or an empty string when the duration is unknown.
    pub fn duration_label(&self) -> String {
        if self.duration_secs == 0 {
            return String::new();
        }
        format!("{}:{:02}", self.duration_secs / 60, self.duration_secs % 60)
    }
}

/// The built-in clip set.
pub fn sample_clips() -> Vec<Clip> {
    vec![
        Clip::new(
            "1",
            "SEALING MY DIGITAL HOLES",
            "Sealing my digital holes - one meeting at a time. The key to staying \
             organized in a remote world 🔒 #RemoteWork #Productivity #Meetings",
        ),
        Clip::new(
            "2",
            "AI'S STRUGGLE WITH CONTEXT",
            "AI's biggest challenge? Understanding context. Here's what we've learned \
             about working with AI tools 🤖 #AI #Technology #Context",
        ),
        Clip::new(
            "3",
            "KEEP IT SIMPLE, STUPID",
            "John Adams knew it best: Keep it simple, stupid. The KISS principle \
             applies to everything we do 💡 #Simplicity #KISS #Wisdom",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_ids_are_unique() {
        let clips = sample_clips();
        assert_eq!(clips.len(), 3);
        let mut ids: Vec<_> = clips.iter().map(|c| c.id.as_str()).collect();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn duration_label_formats_minutes() {
        let mut clip = Clip::new("x", "T", "c");
        assert_eq!(clip.duration_label(), "");
        clip.duration_secs = 75;
        assert_eq!(clip.duration_label(), "1:15");
    }
}
