use dashboard_core::{DashboardViewModel, SortDirection, SortKey};

/// One-line summary printed after each state change so the user sees the
/// effect of a command without asking for the full table.
pub fn render_status(view: &DashboardViewModel) {
    let mut parts = vec![format!(
        "{} result(s), page {}/{}",
        view.total_matching, view.current_page, view.total_pages
    )];
    if !view.search_term.is_empty() {
        parts.push(format!("search '{}'", view.search_term));
    }
    parts.push(format!(
        "sort {} {}",
        sort_key_label(view.sort_key),
        direction_label(view.sort_direction)
    ));
    if view.selected_count > 0 {
        parts.push(format!("{} selected", view.selected_count));
    }
    if view.fetching {
        parts.push("fetching".to_string());
    }
    if view.busy {
        parts.push("busy".to_string());
    }
    println!("[{}]", parts.join(", "));

    if let Some(error) = &view.input_error {
        println!("input error: {error}");
    }
}

/// Full table plus, when open, the detail block.
pub fn render_table(view: &DashboardViewModel) {
    println!(
        "{:<3} {:>5}  {:<40} {:<28} {:<8} {:<8} {:>8} {:>8}",
        "sel", "id", "URL", "Title", "Status", "HTML", "Internal", "External"
    );
    for row in &view.rows {
        let record = &row.record;
        println!(
            "{:<3} {:>5}  {:<40} {:<28} {:<8} {:<8} {:>8} {:>8}",
            if row.selected { "[x]" } else { "[ ]" },
            record.id,
            truncate(&record.url, 40),
            truncate(record.page_title.as_deref().unwrap_or("-"), 28),
            record.status.to_string(),
            record.html_version.as_deref().unwrap_or("-"),
            count_label(record.internal_links_count),
            count_label(record.external_links_count),
        );
    }
    if view.rows.is_empty() {
        println!("(no matching results)");
    }
    println!(
        "page {}/{} of {} matching result(s); header checkbox {}",
        view.current_page,
        view.total_pages,
        view.total_matching,
        if view.all_visible_selected { "[x]" } else { "[ ]" }
    );

    if let Some(detail) = &view.detail {
        let record = &detail.record;
        println!();
        println!("detail: #{} {}", record.id, record.url);
        println!("  status:             {}", record.status);
        println!(
            "  title:              {}",
            record.page_title.as_deref().unwrap_or("-")
        );
        println!(
            "  html version:       {}",
            record.html_version.as_deref().unwrap_or("-")
        );
        println!("  headings:           {}", detail.headings_summary);
        println!(
            "  links chart:        internal {} / external {}",
            detail.links_chart.internal, detail.links_chart.external
        );
        println!(
            "  inaccessible links: {}",
            count_label(record.inaccessible_links_count)
        );
        println!(
            "  login form:         {}",
            match record.has_login_form {
                Some(true) => "yes",
                Some(false) => "no",
                None => "-",
            }
        );
        println!("  created:            {}", record.created_at.to_rfc3339());
        println!("  updated:            {}", record.updated_at.to_rfc3339());
    }
}

fn sort_key_label(key: SortKey) -> &'static str {
    match key {
        SortKey::Url => "url",
        SortKey::PageTitle => "title",
        SortKey::Status => "status",
        SortKey::HtmlVersion => "html",
        SortKey::InternalLinks => "internal",
        SortKey::ExternalLinks => "external",
        SortKey::CreatedAt => "created",
        SortKey::UpdatedAt => "updated",
    }
}

fn direction_label(direction: SortDirection) -> &'static str {
    match direction {
        SortDirection::Ascending => "asc",
        SortDirection::Descending => "desc",
    }
}

fn count_label(count: Option<u64>) -> String {
    count.map_or_else(|| "-".to_string(), |n| n.to_string())
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
