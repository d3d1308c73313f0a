use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub(crate) enum Category {
    Salary,
    Groceries,
    Dining,
    Transport,
    Entertainment,
    Others,
}

impl Category {
    pub(crate) const ALL: [Category; 6] = [
        Self::Salary,
        Self::Groceries,
        Self::Dining,
        Self::Transport,
        Self::Entertainment,
        Self::Others,
    ];

    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Salary => "Salary",
            Self::Groceries => "Groceries",
            Self::Dining => "Dining",
            Self::Transport => "Transport",
            Self::Entertainment => "Entertainment",
            Self::Others => "Others",
        }
    }

    /// Case-insensitive lookup by name.
    pub(crate) fn parse(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().to_lowercase() == lower)
    }

    /// Position in [`Category::ALL`].
    pub(crate) fn index(&self) -> usize {
        match self {
            Self::Salary => 0,
            Self::Groceries => 1,
            Self::Dining => 2,
            Self::Transport => 3,
            Self::Entertainment => 4,
            Self::Others => 5,
        }
    }

    pub(crate) fn icon(&self) -> &'static str {
        match self {
            Self::Salary => "💰",
            Self::Groceries => "🛒",
            Self::Dining => "🍽",
            Self::Transport => "🚗",
            Self::Entertainment => "🎭",
            Self::Others => "📝",
        }
    }

    pub(crate) fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub(crate) fn prev(&self) -> Self {
        let len = Self::ALL.len();
        Self::ALL[(self.index() + len - 1) % len]
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
