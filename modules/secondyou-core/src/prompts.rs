//! Prompt templates for the two simulated paths.
//!
//! Both prompts must carry the four section markers verbatim; the parser is
//! coupled to those exact strings.

use secondyou_common::ProfileInput;

use crate::parser::{FUTURE_MESSAGE_MARKER, YEAR_10_MARKER, YEAR_1_MARKER, YEAR_3_MARKER};

fn profile_block(profile: &ProfileInput) -> String {
    format!(
        "User Profile:\n\
         - Age: {age}\n\
         - Current Location: {location}\n\
         - Current Profession / Life Status: {profession}\n\
         - Key Traits: {traits}",
        age = profile.age,
        location = profile.location,
        profession = profile.profession,
        traits = profile.traits,
    )
}

fn sections_block() -> String {
    format!(
        "{YEAR_1_MARKER}\n\
         [What happens after 1 year? Include emotional texture: fears, growth, changes in relationships, mental health, fulfillment, surprises. Be honest, not overly idealistic. Write 2-3 paragraphs.]\n\n\
         {YEAR_3_MARKER}\n\
         [Where are they at year 3? Show progression, new challenges, deeper changes. Include career development, relationship evolution, personal growth. Write 2-3 paragraphs.]\n\n\
         {YEAR_10_MARKER}\n\
         [How has life changed at year 10? Show the long-term outcome, wisdom gained, what was built or lost. Include reflections on the journey. Write 2-3 paragraphs.]\n\n\
         {FUTURE_MESSAGE_MARKER}\n\
         [A single powerful message from that future self to the present self. One compelling sentence that captures the essence of this path. Format: \"Here's what I'd tell you now: ...\" Keep it under 50 words.]"
    )
}

fn guidelines_block() -> String {
    format!(
        "Guidelines:\n\
         - Write in first person (\"I\" perspective)\n\
         - Be realistic and nuanced, not overly optimistic\n\
         - Include both challenges and rewards\n\
         - Show emotional and psychological development\n\
         - Consider practical aspects like finances, relationships, location\n\
         - Make it personal and relatable\n\
         - Keep each section focused and engaging\n\n\
         IMPORTANT: Use the exact format markers {YEAR_1_MARKER}, {YEAR_3_MARKER}, {YEAR_10_MARKER}, and {FUTURE_MESSAGE_MARKER} so the response can be properly parsed."
    )
}

/// Prompt for the life where the user makes the change.
pub fn build_alternate_prompt(profile: &ProfileInput) -> String {
    format!(
        "You are a compassionate and imaginative life simulator, helping the user explore an alternate version of their life. They are reflecting on a life decision or considering a new one.\n\n\
         {profile}\n\n\
         Alternate Path Being Explored:\n\
         \"{decision}\"\n\n\
         Generate a first-person narrative imagining what their life could look like if they took this alternate path. Structure your response with clear sections:\n\n\
         {sections}\n\n\
         {guidelines}",
        profile = profile_block(profile),
        decision = profile.alternate_path,
        sections = sections_block(),
        guidelines = guidelines_block(),
    )
}

/// Prompt for the life where the user does not make the change.
pub fn build_current_path_prompt(profile: &ProfileInput) -> String {
    format!(
        "You are a compassionate and grounded life simulator, helping the user picture the life ahead of them if they keep going as they are. They are weighing a change but have not made it.\n\n\
         {profile}\n\n\
         Change They Are Considering But Do NOT Make:\n\
         \"{decision}\"\n\n\
         Generate a first-person narrative imagining what their life could look like if they stay on their current path and decide against this change. Let the road not taken surface naturally, without assuming regret or relief. Structure your response with clear sections:\n\n\
         {sections}\n\n\
         {guidelines}",
        profile = profile_block(profile),
        decision = profile.alternate_path,
        sections = sections_block(),
        guidelines = guidelines_block(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> ProfileInput {
        ProfileInput {
            age: 28,
            location: "Austin, TX".into(),
            profession: "Marketing coordinator at a mid-size firm".into(),
            traits: "Curious, risk-averse, values stability".into(),
            alternate_path: "What if I quit to become a full-time potter?".into(),
        }
    }

    #[test]
    fn both_prompts_carry_every_marker() {
        for prompt in [build_alternate_prompt(&profile()), build_current_path_prompt(&profile())] {
            for marker in ["**YEAR_1:**", "**YEAR_3:**", "**YEAR_10:**", "**FUTURE_MESSAGE:**"] {
                assert!(prompt.contains(marker), "missing {marker}");
            }
        }
    }

    #[test]
    fn prompts_interpolate_profile() {
        let prompt = build_alternate_prompt(&profile());
        assert!(prompt.contains("- Age: 28"));
        assert!(prompt.contains("- Current Location: Austin, TX"));
        assert!(prompt.contains("Marketing coordinator at a mid-size firm"));
        assert!(prompt.contains("Curious, risk-averse, values stability"));
        assert!(prompt.contains("\"What if I quit to become a full-time potter?\""));
    }

    #[test]
    fn prompts_differ_in_framing() {
        let alternate = build_alternate_prompt(&profile());
        let current = build_current_path_prompt(&profile());
        assert_ne!(alternate, current);
        assert!(alternate.contains("if they took this alternate path"));
        assert!(current.contains("stay on their current path"));
        assert!(current.contains("Do NOT Make"));
    }

    #[test]
    fn prompts_request_first_person() {
        assert!(build_current_path_prompt(&profile()).contains("first-person narrative"));
        assert!(build_alternate_prompt(&profile()).contains("Write in first person"));
    }
}
