use crate::{allocation::SectionKey, episode::EpisodeConfig};

/// Format seconds as MM:SS timestamp
pub fn format_timestamp(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Format an episode rundown as human-readable markdown
pub fn format_plan_readable(episode: &EpisodeConfig) -> String {
    let mut output = String::new();
    let plan = &episode.plan;

    output.push_str(&format!("# {}\n\n", episode.title));

    output.push_str(&format!(
        "**Duration:** {} minutes | **Main stories:** {} | **Target words:** {} | **Topics:** {}\n\n",
        plan.duration.minutes(),
        plan.num_main_stories,
        plan.target_word_count,
        episode.episode_topics
    ));

    if let Some(adjustment) = &episode.duration_adjustment {
        output.push_str(&format!("> Note: {}\n\n", adjustment));
    }

    output.push_str("## Rundown\n\n");
    let mut start = 0;
    for (key, section) in episode.enabled_sections() {
        let end = start + section.duration_seconds;
        let words = section
            .word_count_target
            .map(|w| format!(", ~{} words", w))
            .unwrap_or_default();
        output.push_str(&format!(
            "- [{}–{}] {} ({}s{})\n",
            format_timestamp(start),
            format_timestamp(end),
            key.title(),
            section.duration_seconds,
            words
        ));
        start = end;
    }
    output.push('\n');

    if let Some(transitions) = plan.get(SectionKey::Transitions) {
        output.push_str(&format!(
            "Transitions: {}s spread between segments\n",
            transitions.duration_seconds
        ));
    }
    output.push_str(&format!(
        "Scheduled: {} of {} (~{} words)\n",
        format_timestamp(plan.scheduled_seconds()),
        format_timestamp(plan.total_seconds),
        plan.scheduled_words()
    ));

    output
}
