use crate::analysis::engine;
use crate::config::DisplayMode;
use crate::models::{AnalysisResult, BackendResponse, ComparisonSession};
use crate::orchestrator::PresentationPort;

pub struct ReportFormatter {
    use_colors: bool,
    verbose: bool,
    mode: DisplayMode,
}

impl ReportFormatter {
    pub fn new(use_colors: bool, verbose: bool, mode: DisplayMode) -> Self {
        Self {
            use_colors,
            verbose,
            mode,
        }
    }

    pub fn format_session(&self, session: &ComparisonSession) -> String {
        let mut output = String::new();

        output.push_str(&self.format_header(session));
        output.push('\n');

        match self.mode {
            DisplayMode::SideBySide => {
                for response in session.ordered_responses() {
                    output.push_str(&self.format_response(response));
                    output.push('\n');
                }
                output.push_str(&self.format_analysis_section(session));
            }
            DisplayMode::Unified => {
                output.push_str(&self.format_analysis_section(session));
                output.push_str(&self.format_explanations(session));
            }
            DisplayMode::AnalysisOnly => {
                output.push_str(&self.format_analysis_section(session));
            }
        }

        output
    }

    fn format_header(&self, session: &ComparisonSession) -> String {
        let title = "Response Comparison";
        let prompt_preview: String = session.prompt.chars().take(80).collect();
        let counts = format!(
            "{} answered, {} failed",
            session.successful_responses().len(),
            session.failed_responses().len()
        );

        if self.use_colors {
            format!(
                "\x1b[1m\x1b[36m═══ {title} ═══\x1b[0m\nPrompt: {prompt_preview}\n{counts}\n"
            )
        } else {
            format!("=== {title} ===\nPrompt: {prompt_preview}\n{counts}\n")
        }
    }

    fn format_response(&self, response: &BackendResponse) -> String {
        let mut section = String::new();
        let heading = match &response.error {
            None => format!(
                "── {} ({} ms, ~{} tokens)",
                response.display_name, response.latency_ms, response.token_estimate
            ),
            Some(kind) => format!(
                "── {} [{}] ({} ms)",
                response.display_name,
                kind.as_str(),
                response.latency_ms
            ),
        };

        if self.use_colors {
            let color = if response.is_success() {
                "\x1b[1m\x1b[32m"
            } else {
                "\x1b[1m\x1b[31m"
            };
            section.push_str(&format!("{color}{heading}\x1b[0m\n"));
        } else {
            section.push_str(&heading);
            section.push('\n');
        }

        if response.is_success() {
            section.push_str(&response.text);
            section.push('\n');
        } else {
            section.push_str("(no answer)\n");
        }
        section
    }

    fn format_analysis_section(&self, session: &ComparisonSession) -> String {
        match &session.analysis {
            Some(analysis) => self.format_analysis(analysis),
            None => "Analysis unavailable (needs at least two successful answers).\n".to_string(),
        }
    }

    pub fn format_analysis(&self, analysis: &AnalysisResult) -> String {
        let mut output = String::new();

        output.push_str(&self.format_section_title("Analysis"));
        output.push_str(&format!(
            "Overall similarity: {}%\n",
            analysis.similarity_percent()
        ));

        if !analysis.common_points.is_empty() {
            output.push_str("\nCommon ground:\n");
            for point in &analysis.common_points {
                output.push_str(&format!("  • {point}\n"));
            }
        }

        if !analysis.key_differences.is_empty() {
            output.push_str("\nKey differences:\n");
            for difference in &analysis.key_differences {
                output.push_str(&format!(
                    "  • [{}] {}\n",
                    difference.aspect, difference.description
                ));
            }
        }

        if !analysis.code_analysis.is_empty() {
            output.push_str("\nCode:\n");
            for (backend_id, report) in &analysis.code_analysis {
                let languages = if report.languages.is_empty() {
                    "none".to_string()
                } else {
                    report
                        .languages
                        .iter()
                        .cloned()
                        .collect::<Vec<_>>()
                        .join(", ")
                };
                output.push_str(&format!(
                    "  {backend_id}: {} block(s), languages: {languages}, complexity: {}\n",
                    report.block_count,
                    report.complexity.as_str()
                ));
            }
        }

        output
    }

    fn format_explanations(&self, session: &ComparisonSession) -> String {
        let ordered = session.ordered_responses();
        let explanations = engine::compute_explanations(&ordered);
        if explanations.is_empty() {
            return String::new();
        }

        let mut output = String::new();
        output.push_str(&self.format_section_title("How each backend explains it"));
        for response in session.successful_responses() {
            let Some(profile) = explanations.get(&response.backend_id) else {
                continue;
            };
            output.push_str(&format!(
                "{} — clarity {}/10, depth {}\n",
                response.display_name,
                profile.clarity_score,
                profile.depth.as_str()
            ));
            if let Some(ref introduction) = profile.introduction {
                output.push_str(&format!("  {introduction}\n"));
            }
            for point in &profile.key_points {
                output.push_str(&format!("  - {point}\n"));
            }

            if self.verbose {
                let blocks = engine::extract_all_code_blocks(&[response]);
                for block in blocks {
                    output.push_str(&format!(
                        "  [{} code, {} chars]\n",
                        block.language,
                        block.code.chars().count()
                    ));
                }
            }
            output.push('\n');
        }
        output
    }

    fn format_section_title(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n\x1b[1m\x1b[36m{title}\x1b[0m\n")
        } else {
            format!("\n{title}\n")
        }
    }
}

/// Prints each session snapshot to stdout as it arrives.
pub struct ConsolePresenter {
    formatter: ReportFormatter,
}

impl ConsolePresenter {
    pub fn new(formatter: ReportFormatter) -> Self {
        Self { formatter }
    }
}

impl PresentationPort for ConsolePresenter {
    fn present(&self, session: &ComparisonSession) {
        println!("{}", self.formatter.format_session(session));
    }
}
