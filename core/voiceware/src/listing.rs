//! Tab-aligned `--list` output line formatting.

const TAB_WIDTH: usize = 8;
const FILENAME_ALIGN_WIDTH: usize = 40;
const MODE_PCM: u8 = 0x40;

/// One rendered list-mode row: `segment<TAB>index<TAB>name<TABS><comment>`.
///
/// `message_mode` is `None` when the mode byte couldn't be read (offset past
/// the end of the ROM); the `(PCM)` marker is only added when it reads as
/// `0x40` and the user-supplied comment doesn't already mention it.
pub fn render_row(
    segment_index: usize,
    msg_index_in_segment: usize,
    name: &str,
    message_mode: Option<u8>,
    user_comment: Option<&str>,
) -> String {
    let pcm_already_noted = user_comment.is_some_and(|c| c.contains("(PCM)"));
    let pcm_tag_added = message_mode == Some(MODE_PCM) && !pcm_already_noted;
    let has_user_comment = user_comment.is_some_and(|c| !c.is_empty());

    let mut comment = String::from("#");
    if pcm_tag_added {
        comment.push_str(" (PCM)");
    }
    if has_user_comment {
        if pcm_tag_added || comment == "#" {
            comment.push(' ');
        }
        comment.push_str(user_comment.unwrap());
    } else if !pcm_tag_added {
        comment.push(' ');
    }

    let padding = tab_padding(name);
    format!(
        "{}\t{}\t{}{}{}",
        segment_index, msg_index_in_segment, name, padding, comment
    )
}

/// Number of tabs needed after `name` so that, assuming `TAB_WIDTH`-wide tab
/// stops, the comment column lines up at `FILENAME_ALIGN_WIDTH` — falling
/// back to a single tab once the name itself runs past that width.
fn tab_padding(name: &str) -> String {
    let target_stops = FILENAME_ALIGN_WIDTH.div_ceil(TAB_WIDTH);
    let num_stops = name.chars().count() / TAB_WIDTH;
    let tabs_to_print = if num_stops < target_stops {
        target_stops - num_stops
    } else {
        1
    };
    "\t".repeat(tabs_to_print)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_name_gets_full_padding_to_five_stops() {
        let row = render_row(0, 0, "greeting", None, None);
        assert_eq!(row, "0\t0\tgreeting\t\t\t\t# ");
    }

    #[test]
    fn name_past_align_width_gets_single_tab() {
        let long_name = "a".repeat(45);
        let row = render_row(0, 0, &long_name, None, None);
        assert!(row.ends_with(&format!("{}\t# ", long_name)));
    }

    #[test]
    fn pcm_mode_adds_marker_when_absent_from_user_comment() {
        let row = render_row(1, 2, "msg", Some(MODE_PCM), Some("a prompt"));
        assert!(row.contains("# (PCM) a prompt"));
    }

    #[test]
    fn pcm_marker_not_duplicated_when_user_comment_already_has_it() {
        let row = render_row(1, 2, "msg", Some(MODE_PCM), Some("already (PCM) tagged"));
        assert_eq!(row.matches("(PCM)").count(), 1);
    }

    #[test]
    fn no_user_comment_and_no_pcm_tag_trails_a_space() {
        let row = render_row(0, 0, "msg", Some(0x00), None);
        assert!(row.ends_with("# "));
    }
}
