use crate::backend::Backend;
use crate::ui::theme::Theme;
use crate::ui::truncate_chars;

/// Header rule + title + rule, separator rule + section title + rule.
const CHROME_ROWS: usize = 5;
/// Rows of the preview region consumed by the separator block.
const PREVIEW_HEADER_ROWS: usize = 3;

/// Lay out one full screen of text for the current list, cursor and terminal
/// size. Pure: the only backend calls are `render_line` for visible items and
/// `render_preview` for the selected one.
pub fn build_frame<B: Backend>(
    backend: &B,
    items: &[B::Item],
    selected: usize,
    cols: u16,
    rows: u16,
    preview_rows: u16,
) -> String {
    let width = cols as usize;
    let mut frame = String::new();

    if items.is_empty() {
        push_line(
            &mut frame,
            Theme::error()
                .apply(format!("No {} items found", backend.name()))
                .to_string(),
        );
        return frame;
    }

    let preview_rows = preview_rows as usize;
    let list_rows = (rows as usize).saturating_sub(preview_rows + CHROME_ROWS);

    let rule = "═".repeat(width);
    push_line(&mut frame, Theme::header().apply(&rule).to_string());
    push_line(
        &mut frame,
        format!(
            "{}{}",
            Theme::title()
                .apply(format!(" {} Picker ", backend.name().to_uppercase())),
            Theme::hint().apply("(j/k navigate, Enter select, q quit)"),
        ),
    );
    push_line(&mut frame, Theme::header().apply(&rule).to_string());

    // Items beyond the list region are not shown and not reachable; the list
    // does not scroll.
    for (i, item) in items.iter().enumerate().take(list_rows) {
        let marker = if i == selected {
            Theme::marker().apply("▶ ").to_string()
        } else {
            "  ".to_string()
        };
        push_line(
            &mut frame,
            format!("{}{}", marker, backend.render_line(item, i == selected)),
        );
    }

    let thin = "─".repeat(width);
    push_line(&mut frame, Theme::separator().apply(&thin).to_string());
    push_line(
        &mut frame,
        Theme::section().apply(" Item Details & Preview").to_string(),
    );
    push_line(&mut frame, Theme::separator().apply(&thin).to_string());

    let preview = backend.render_preview(&items[selected]);
    let visible = preview_rows.saturating_sub(PREVIEW_HEADER_ROWS);
    for line in preview.lines().take(visible) {
        push_line(
            &mut frame,
            Theme::preview()
                .apply(truncate_chars(line, width.saturating_sub(1)))
                .to_string(),
        );
    }

    let mut controls: Vec<String> = vec![
        "j/k: Navigate".to_string(),
        "Enter: Select".to_string(),
        "q: Quit".to_string(),
    ];
    for action in backend.secondary_actions() {
        controls.push(format!("{}: {}", action.key, action.label));
    }
    frame.push('\n');
    push_line(
        &mut frame,
        Theme::legend()
            .apply(format!("Controls: {}", controls.join(" | ")))
            .to_string(),
    );

    frame
}

fn push_line(frame: &mut String, line: String) {
    frame.push_str(&line);
    frame.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{Handoff, SecondaryAction};

    struct FlatBackend {
        items: Vec<String>,
    }

    const FLAT_ACTIONS: &[SecondaryAction] = &[SecondaryAction {
        key: 'd',
        label: "Delete item",
        confirm: true,
    }];

    impl Backend for FlatBackend {
        type Item = String;

        fn name(&self) -> &'static str {
            "flat"
        }

        fn description(&self) -> &'static str {
            "test backend"
        }

        fn is_available(&self) -> bool {
            true
        }

        fn list_items(&self) -> Vec<String> {
            self.items.clone()
        }

        fn item_name(&self, item: &String) -> String {
            item.clone()
        }

        fn render_line(&self, item: &String, selected: bool) -> String {
            if selected {
                format!("[{}]", item)
            } else {
                item.clone()
            }
        }

        fn render_preview(&self, item: &String) -> String {
            format!("details for {}\nsecond line\nthird line that is much longer than any tiny terminal width", item)
        }

        fn primary_action(&self, _item: &String) -> Handoff {
            Handoff::Done
        }

        fn secondary_actions(&self) -> &[SecondaryAction] {
            FLAT_ACTIONS
        }
    }

    fn backend() -> FlatBackend {
        FlatBackend {
            items: vec!["alpha".to_string(), "beta".to_string(), "gamma".to_string()],
        }
    }

    #[test]
    fn test_frame_has_header_items_and_legend() {
        let b = backend();
        let frame = build_frame(&b, &b.items, 1, 80, 40, 20);
        assert!(frame.contains("FLAT Picker"));
        assert!(frame.contains("alpha"));
        assert!(frame.contains("[beta]"));
        assert!(frame.contains("▶"));
        assert!(frame.contains("details for beta"));
        assert!(frame.contains("Item Details & Preview"));
        assert!(frame.contains("d: Delete item"));
        assert!(frame.contains("q: Quit"));
    }

    #[test]
    fn test_items_beyond_list_region_are_hidden() {
        let b = backend();
        // 26 rows - 20 preview - 5 chrome = 1 visible item.
        let frame = build_frame(&b, &b.items, 0, 80, 26, 20);
        assert!(frame.contains("alpha"));
        assert!(!frame.contains("beta"));
        assert!(!frame.contains("gamma"));
    }

    #[test]
    fn test_preview_lines_truncated_to_width() {
        let b = backend();
        let frame = build_frame(&b, &b.items, 0, 30, 40, 20);
        assert!(!frame.contains("tiny terminal width"));
        assert!(frame.contains("third line that is much longe"));
    }

    #[test]
    fn test_preview_capped_to_region() {
        let b = backend();
        // A 4-row preview region minus 3 header rows leaves a single line.
        let frame = build_frame(&b, &b.items, 0, 80, 40, 4);
        assert!(frame.contains("details for alpha"));
        assert!(!frame.contains("second line"));
    }

    #[test]
    fn test_empty_list_renders_single_diagnostic() {
        let b = FlatBackend { items: Vec::new() };
        let frame = build_frame(&b, &b.items, 0, 80, 40, 20);
        assert!(frame.contains("No flat items found"));
        assert!(!frame.contains("Picker"));
        assert!(!frame.contains("Controls:"));
    }

    #[test]
    fn test_single_selection_marker() {
        let b = backend();
        let frame = build_frame(&b, &b.items, 2, 80, 40, 20);
        assert_eq!(frame.matches('▶').count(), 1);
        assert!(frame.contains("[gamma]"));
    }
}
