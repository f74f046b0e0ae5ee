use std::collections::HashSet;

/// Renders user-supplied free text down to what a reader would actually see.
///
/// Every tag is dropped; `<script>` and `<style>` lose their content too.
/// Stored text is never rewritten with this, it only backs validation.
pub fn visible_text(input: &str) -> String {
    let mut builder = ammonia::Builder::empty();
    builder.clean_content_tags(HashSet::from(["script", "style"]));
    builder.clean(input).to_string()
}
