//! Target languages the reviewer understands.
//!
//! The set is fixed and small: it drives the language select in the
//! settings sidebar, the fence tag on the code sent to the model, and the
//! starter sample seeded into an empty editor.

#[cfg(test)]
#[path = "language_test.rs"]
mod tests;

use serde::{Deserialize, Serialize};

/// A programming language the user can ask for a review in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Python,
    JavaScript,
    TypeScript,
    Go,
    Java,
    CSharp,
}

impl Language {
    /// All languages, in display order for the settings select.
    pub const ALL: [Language; 6] = [
        Language::Python,
        Language::JavaScript,
        Language::TypeScript,
        Language::Go,
        Language::Java,
        Language::CSharp,
    ];

    /// Lowercase identifier used on the wire and as the Markdown fence tag.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::Python => "python",
            Self::JavaScript => "javascript",
            Self::TypeScript => "typescript",
            Self::Go => "go",
            Self::Java => "java",
            Self::CSharp => "csharp",
        }
    }

    /// Human-readable name for UI labels.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Python => "Python",
            Self::JavaScript => "JavaScript",
            Self::TypeScript => "TypeScript",
            Self::Go => "Go",
            Self::Java => "Java",
            Self::CSharp => "C#",
        }
    }

    /// Parse a slug back into a language. Returns `None` for unknown input.
    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.slug() == slug)
    }

    /// Starter snippet seeded into an empty editor when this language is
    /// selected, so a first-time user has something to review immediately.
    #[must_use]
    pub fn starter_sample(self) -> &'static str {
        match self {
            Self::Python => {
                "def fetch_users(db):\n    users = db.query('SELECT * FROM users')\n    for u in users:\n        print(u.name)\n"
            }
            Self::JavaScript => {
                "async function getUsers(req, res) {\n  const users = await db.find('users')\n  res.send(users)\n}\n"
            }
            Self::TypeScript => {
                "async function fetchData(url: string): Promise<any> {\n  const res = await fetch(url)\n  return res.json()\n}\n"
            }
            Self::Go => "package main\n\nfunc Sum(a int, b int) int {\n    return a + b\n}\n",
            Self::Java => {
                "public class Hello {\n  public static void main(String[] args) {\n    System.out.println(\"Hello World\");\n  }\n}\n"
            }
            Self::CSharp => {
                "using System;\nclass Program {\n  static void Main() {\n    Console.WriteLine(\"Hello World\");\n  }\n}\n"
            }
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}
