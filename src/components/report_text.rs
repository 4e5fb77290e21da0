//! Renderer for the backend's multi-line AI explanations.
//!
//! The text arrives as loose markdown: `**bold**` markers, `-`/`•`
//! bullets, and `Heading:` lines. Rendering strips the markers and maps
//! each line to a bullet row, a heading, or a paragraph. The content
//! itself is shown verbatim, nothing is reworded client-side.

use leptos::prelude::*;

/// One display line of a formatted report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportLine {
    Blank,
    Heading(String),
    Bullet(String),
    Paragraph(String),
}

/// Classify the raw explanation text line by line.
pub fn parse_report_lines(text: &str) -> Vec<ReportLine> {
    text.lines()
        .map(|line| {
            let clean = line.replace("**", "").replace('*', "");
            let clean = clean.trim();
            if clean.is_empty() {
                ReportLine::Blank
            } else if line.trim_start().starts_with('-') || line.trim_start().starts_with('•') {
                let body = clean.trim_start_matches(['-', '•']).trim_start();
                ReportLine::Bullet(body.to_string())
            } else if clean.ends_with(':') {
                ReportLine::Heading(clean.to_string())
            } else {
                ReportLine::Paragraph(clean.to_string())
            }
        })
        .collect()
}

#[component]
pub fn ReportText(#[prop(into)] text: String) -> impl IntoView {
    let lines = parse_report_lines(&text);

    view! {
        <div class="mt-2 space-y-1">
            {lines
                .into_iter()
                .map(|line| match line {
                    ReportLine::Blank => view! { <div class="h-2"></div> }.into_any(),
                    ReportLine::Heading(text) => {
                        view! { <h4 class="font-semibold text-primary mt-3">{text}</h4> }
                            .into_any()
                    }
                    ReportLine::Bullet(text) => {
                        view! {
                            <div class="flex gap-2 ml-2">
                                <span class="text-primary">"•"</span>
                                <p class="text-base-content/80">{text}</p>
                            </div>
                        }
                        .into_any()
                    }
                    ReportLine::Paragraph(text) => {
                        view! { <p class="text-base-content/90">{text}</p> }.into_any()
                    }
                })
                .collect_view()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_headings_bullets_and_paragraphs() {
        let text = "Key Drivers:\n- **short tenure**\n• month-to-month contract\n\nOverall risk is high.";
        let lines = parse_report_lines(text);
        assert_eq!(
            lines,
            vec![
                ReportLine::Heading("Key Drivers:".to_string()),
                ReportLine::Bullet("short tenure".to_string()),
                ReportLine::Bullet("month-to-month contract".to_string()),
                ReportLine::Blank,
                ReportLine::Paragraph("Overall risk is high.".to_string()),
            ]
        );
    }

    #[test]
    fn strips_emphasis_markers_without_rewording() {
        let lines = parse_report_lines("**High risk** customer");
        assert_eq!(
            lines,
            vec![ReportLine::Paragraph("High risk customer".to_string())]
        );
    }
}
