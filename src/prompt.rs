//! Prompt text for asking an external model to rewrite a message for reach.
//!
//! Only the prompt is built here; sending it anywhere is up to the caller.

/// Longest message the prompt asks the model to produce.
pub const MAX_POST_CHARS: usize = 280;

/// Render the rewrite prompt for `text`. Competitor domains are listed as
/// `name.tld` for every name/tld pair so the model knows which links to drop.
pub fn optimize_prompt<N, T>(text: &str, competitor_names: &[N], competitor_tlds: &[T]) -> String
where
    N: AsRef<str>,
    T: AsRef<str>,
{
    let domains = competitor_names
        .iter()
        .flat_map(|name| {
            competitor_tlds
                .iter()
                .map(move |tld| format!("{}.{}", name.as_ref(), tld.as_ref()))
        })
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "You generate posts for a microblogging network that get more likes and reposts than the draft you are given.\n\
         The ranking algorithm boosts and demotes posts based on their content. Links to news sites are boosted. \
         Links to other social networks ({domains}) are demoted; remove them.\n\
         Never add hashtags. Remove every hashtag in the draft.\n\
         Keep the result under {max} characters, use short sentences typical of posts, and base it on this draft:\n\
         {text}\n",
        domains = domains,
        max = MAX_POST_CHARS,
        text = text.trim(),
    )
}
