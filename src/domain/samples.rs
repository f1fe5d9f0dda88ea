//! Seed content inserted the first time an editor opens an empty wiki.

/// One entry of the fixed sample set.
pub struct SampleEntry {
    pub position: i32,
    pub is_html: bool,
    pub html: &'static str,
    pub is_draft: bool,
}

/// Sample entries are seeded as drafts so only editors see them until they
/// are deliberately published.
pub const SAMPLE_ENTRIES: &[SampleEntry] = &[SampleEntry {
    position: 1,
    is_html: true,
    is_draft: true,
    html: r#"
<b>Customize Your Experience</b>
<br><br>

You can customize your experience in several ways:
<ul>
  <li>You can watch the lesson videos multiple times for a deeper
  understanding of each topic.</li>
  <li>You can read the text version of each lesson. Click the button above
  the video to access it.</li>
  <li>Lesson activities are designed for multiple levels of experience. The
  first question checks your recall of the material; the second lets you
  verify your mastery; the third is an opportunity to apply your skills and
  share your experiences in the class forums. Activities are not graded and
  do not affect your final grade.</li>
  <li>Extra challenges are posted in the forums for people who seek
  additional opportunities to practice their new skills.</li>
</ul>
<br>

<b>Forum</b>
<br>

<p>Apply your skills, share with others, and connect with your peers and
course staff in the <a href="forum">forum</a>. Discuss your favorite tips
and troubleshoot technical issues there.</p>

<p>For an optimal learning experience, please plan to use the most recent
version of your browser, as well as a desktop, laptop or tablet computer
instead of your mobile phone.</p>
"#,
}];
