use crate::api::models::{Facet, Issue, QualityProfile};
use crate::core::report::ReportModel;
use crate::core::services::STATUS_DOWN;
use crate::utils::text::cell_text;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table, presets};
use crossterm::terminal;

/// Formatter for the tables printed by the CLI
pub struct TableDisplay {
    max_width: Option<usize>,
    use_colors: bool,
}

/// Column widths for the issue table: (rule, severity, language, location, message)
type IssueColumnWidths = (usize, usize, usize, usize, usize);

impl TableDisplay {
    pub fn new() -> Self {
        Self {
            max_width: Self::detect_terminal_width(),
            use_colors: true,
        }
    }

    fn detect_terminal_width() -> Option<usize> {
        match terminal::size() {
            Ok((cols, _rows)) => Some(usize::from(cols).clamp(40, 200)),
            Err(_) => Some(80),
        }
    }

    pub fn with_max_width(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }

    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Issues with their joined language, at most `limit` rows.
    pub fn render_issue_list(&self, issues: &[Issue], limit: Option<usize>) -> String {
        let mut table = self.new_table();
        self.set_header(&mut table, &["Rule", "Severity", "Language", "Location", "Message"]);

        let shown = match limit {
            Some(limit) => &issues[..issues.len().min(limit)],
            None => issues,
        };

        let (rule_width, severity_width, language_width, location_width, message_width) =
            self.issue_column_widths();

        for issue in shown {
            let language = if issue.language.is_empty() {
                "-"
            } else {
                issue.language.as_str()
            };

            table.add_row(vec![
                Cell::new(cell_text(&issue.rule_key, rule_width)),
                self.severity_cell(&cell_text(&issue.severity, severity_width)),
                Cell::new(cell_text(language, language_width)),
                Cell::new(cell_text(&Self::location(issue), location_width)),
                Cell::new(cell_text(&issue.message, message_width)),
            ]);
        }

        let mut output = table.to_string();
        if shown.len() < issues.len() {
            output.push_str(&format!(
                "\nShowing {} of {} issues",
                shown.len(),
                issues.len()
            ));
        }
        output
    }

    /// One row per facet value, grouped by facet property.
    pub fn render_facets(&self, facets: &[Facet]) -> String {
        let mut table = self.new_table();
        self.set_header(&mut table, &["Facet", "Value", "Count"]);

        for facet in facets {
            for (index, value) in facet.values.iter().enumerate() {
                let property = if index == 0 { facet.property.as_str() } else { "" };
                table.add_row(vec![
                    Cell::new(property),
                    Cell::new(cell_text(&value.val, 50)),
                    Cell::new(value.count.to_string()),
                ]);
            }
        }

        table.to_string()
    }

    pub fn render_profiles(&self, profiles: &[QualityProfile]) -> String {
        let mut table = self.new_table();
        self.set_header(&mut table, &["Key", "Name", "Language", "Rules", "Projects"]);

        for profile in profiles {
            table.add_row(vec![
                Cell::new(cell_text(profile.key(), 30)),
                Cell::new(cell_text(&profile.metadata.name, 40)),
                Cell::new(&profile.metadata.language),
                Cell::new(profile.data.rules.len().to_string()),
                Cell::new(profile.projects.len().to_string()),
            ]);
        }

        table.to_string()
    }

    pub fn render_status(&self, version: &str, status: &str) -> String {
        let mut table = self.new_table();
        self.set_header(&mut table, &["Version", "Status"]);
        table.add_row(vec![Cell::new(version), self.status_cell(status)]);
        table.to_string()
    }

    /// Short overview of a collected report.
    pub fn render_report_summary(&self, model: &ReportModel) -> String {
        let mut table = self.new_table();
        self.set_header(&mut table, &["Item", "Value"]);

        table.add_row(vec![Cell::new("Project"), Cell::new(&model.project_key)]);
        table.add_row(vec![Cell::new("Branch"), Cell::new(&model.branch)]);
        table.add_row(vec![
            Cell::new("Server version"),
            Cell::new(&model.server_version),
        ]);
        table.add_row(vec![
            Cell::new("Server status"),
            self.status_cell(&model.server_status),
        ]);
        table.add_row(vec![
            Cell::new("Issues"),
            Cell::new(model.issues.len().to_string()),
        ]);
        table.add_row(vec![
            Cell::new("Unconfirmed issues"),
            Cell::new(model.unconfirmed_issues.len().to_string()),
        ]);
        table.add_row(vec![
            Cell::new("Quality profiles"),
            Cell::new(model.quality_profiles.len().to_string()),
        ]);

        table.to_string()
    }

    fn new_table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(presets::UTF8_FULL);
        table.set_content_arrangement(ContentArrangement::Dynamic);
        self.configure_table_width(&mut table);
        table
    }

    fn set_header(&self, table: &mut Table, titles: &[&str]) {
        if self.use_colors {
            table.set_header(titles.iter().map(|title| {
                Cell::new(title)
                    .add_attribute(Attribute::Bold)
                    .fg(Color::Cyan)
            }));
        } else {
            table.set_header(titles.to_vec());
        }
    }

    fn severity_cell(&self, severity: &str) -> Cell {
        let cell = Cell::new(severity);
        if !self.use_colors {
            return cell;
        }
        match severity {
            "BLOCKER" | "CRITICAL" => cell.fg(Color::Red).add_attribute(Attribute::Bold),
            "MAJOR" => cell.fg(Color::Yellow),
            "MINOR" | "INFO" => cell.fg(Color::Green),
            _ => cell,
        }
    }

    fn status_cell(&self, status: &str) -> Cell {
        let cell = Cell::new(status);
        if !self.use_colors {
            return cell;
        }
        match status {
            "UP" => cell.fg(Color::Green),
            STATUS_DOWN => cell.fg(Color::Red).add_attribute(Attribute::Bold),
            _ => cell.fg(Color::Yellow),
        }
    }

    fn location(issue: &Issue) -> String {
        // components look like "project:path/to/File.java"
        let path = issue
            .component
            .split_once(':')
            .map_or(issue.component.as_str(), |(_, path)| path);
        match issue.line {
            Some(line) => format!("{}:{}", path, line),
            None => path.to_string(),
        }
    }

    fn configure_table_width(&self, table: &mut Table) {
        let width = match self.max_width {
            Some(terminal_width) if terminal_width > 20 => terminal_width - 6,
            Some(terminal_width) => terminal_width.max(40),
            None => 80,
        };
        table.set_width(u16::try_from(width).unwrap_or(u16::MAX));
    }

    fn issue_column_widths(&self) -> IssueColumnWidths {
        let terminal_width = self.max_width.unwrap_or(80);

        if terminal_width < 80 {
            (12, 8, 6, 15, 20)
        } else if terminal_width < 120 {
            (18, 9, 10, 25, 40)
        } else {
            (25, 9, 12, 40, 80)
        }
    }
}

impl Default for TableDisplay {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{FacetValue, ProfileData, ProfileMetaData};

    fn plain() -> TableDisplay {
        TableDisplay::new().with_max_width(120).with_colors(false)
    }

    fn issue(rule: &str, language: &str, message: &str) -> Issue {
        Issue {
            key: "i".to_string(),
            rule_key: rule.to_string(),
            severity: "MAJOR".to_string(),
            component: "proj:src/Main.java".to_string(),
            line: Some(12),
            message: message.to_string(),
            language: language.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_render_issue_list() {
        let issues = vec![
            issue("java:S100", "Java", "Rename this method."),
            issue("py:S1", "", "Multi\nline message"),
        ];

        let output = plain().render_issue_list(&issues, None);

        assert!(output.contains("java:S100"));
        assert!(output.contains("Java"));
        assert!(output.contains("src/Main.java:12"));
        assert!(output.contains("Multi line message"));
        assert!(!output.contains("Showing"));
    }

    #[test]
    fn test_render_issue_list_with_limit() {
        let issues = vec![
            issue("java:S100", "Java", "first"),
            issue("java:S101", "Java", "second"),
            issue("java:S102", "Java", "third"),
        ];

        let output = plain().render_issue_list(&issues, Some(2));

        assert!(output.contains("java:S101"));
        assert!(!output.contains("java:S102"));
        assert!(output.contains("Showing 2 of 3 issues"));
    }

    #[test]
    fn test_render_facets() {
        let facets = vec![Facet {
            property: "severities".to_string(),
            values: vec![
                FacetValue {
                    val: "MAJOR".to_string(),
                    count: 8,
                },
                FacetValue {
                    val: "MINOR".to_string(),
                    count: 4,
                },
            ],
        }];

        let output = plain().render_facets(&facets);

        assert!(output.contains("severities"));
        assert!(output.contains("MINOR"));
        assert!(output.contains('8'));
    }

    #[test]
    fn test_render_profiles() {
        let profiles = vec![QualityProfile::new(
            ProfileMetaData {
                key: "AX-java".to_string(),
                name: "Sonar way".to_string(),
                language: "java".to_string(),
                ..Default::default()
            },
            ProfileData::default(),
            vec![],
        )];

        let output = plain().render_profiles(&profiles);

        assert!(output.contains("AX-java"));
        assert!(output.contains("Sonar way"));
    }

    #[test]
    fn test_render_status_down() {
        let output = TableDisplay::new()
            .with_max_width(80)
            .render_status("10.4", STATUS_DOWN);
        assert!(output.contains("10.4"));
        assert!(output.contains("DOWN"));
    }

    #[test]
    fn test_location_without_project_prefix_or_line() {
        let mut plain_issue = issue("r", "", "m");
        plain_issue.component = "README.md".to_string();
        plain_issue.line = None;
        assert_eq!(TableDisplay::location(&plain_issue), "README.md");
    }
}
