//! Turns an `AnalysisResult` into the four labeled sections of the results
//! container.

use askama::Template;

use crate::analysis::AnalysisResult;
use crate::errors::ClientError;

pub const PLACEHOLDER: &str = "No items detected";

/// Section titles, in display order.
pub const SECTION_TITLES: [&str; 4] = [
    "Required Skills",
    "Experience Requirements",
    "Qualifications",
    "Responsibilities",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionBody {
    Items(Vec<String>),
    Placeholder,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: &'static str,
    pub body: SectionBody,
}

impl Section {
    /// Empty for a placeholder section.
    pub fn items(&self) -> &[String] {
        match &self.body {
            SectionBody::Items(items) => items,
            SectionBody::Placeholder => &[],
        }
    }
}

#[derive(Template)]
#[template(path = "results.html")]
struct ResultsHtml<'a> {
    id: &'a str,
    classes: String,
    placeholder: &'a str,
    sections: &'a [Section],
}

/// The page element that displays analysis results. Starts out hidden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsContainer {
    pub id: String,
    pub sections: Vec<Section>,
    pub hidden: bool,
    pub animated: bool,
}

impl ResultsContainer {
    pub fn new(id: &str) -> ResultsContainer {
        ResultsContainer {
            id: id.to_string(),
            sections: Vec::new(),
            hidden: true,
            animated: false,
        }
    }

    pub fn to_html(&self) -> Result<String, ClientError> {
        let mut classes = Vec::new();
        if self.hidden {
            classes.push("d-none");
        }
        if self.animated {
            classes.push("fade-in");
        }
        let html = ResultsHtml {
            id: &self.id,
            classes: classes.join(" "),
            placeholder: PLACEHOLDER,
            sections: &self.sections,
        };
        Ok(html.render()?)
    }

    /// Terminal rendering: titles followed by numbered items.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for section in &self.sections {
            out.push_str(section.title);
            out.push('\n');
            match &section.body {
                SectionBody::Items(items) => {
                    for (i, item) in items.iter().enumerate() {
                        out.push_str(&format!("  {}. {}\n", i + 1, item));
                    }
                }
                SectionBody::Placeholder => {
                    out.push_str("  ");
                    out.push_str(PLACEHOLDER);
                    out.push('\n');
                }
            }
        }
        out
    }
}

/// Replaces the container's content with the result's sections, then
/// reveals it. A missing container is a no-op.
pub fn render_analysis(container: Option<&mut ResultsContainer>, result: &AnalysisResult) {
    let Some(container) = container else {
        return;
    };
    let sources = [
        &result.skills,
        &result.experience,
        &result.qualifications,
        &result.responsibilities,
    ];
    container.sections = SECTION_TITLES
        .into_iter()
        .zip(sources)
        .map(|(title, items)| Section {
            title,
            body: if items.is_empty() {
                SectionBody::Placeholder
            } else {
                SectionBody::Items(items.clone())
            },
        })
        .collect();
    container.hidden = false;
    container.animated = true;
}
