//! The `examiner init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create examiner.toml
    if std::path::Path::new("examiner.toml").exists() {
        println!("examiner.toml already exists, skipping.");
    } else {
        std::fs::write("examiner.toml", SAMPLE_CONFIG)?;
        println!("Created examiner.toml");
    }

    // Create example exam
    std::fs::create_dir_all("exams")?;
    let example_path = std::path::Path::new("exams/hsk1.toml");
    if example_path.exists() {
        println!("exams/hsk1.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_EXAM)?;
        println!("Created exams/hsk1.toml");
    }

    println!("\nNext steps:");
    println!("  1. Run: examiner validate --catalog exams/hsk1.toml");
    println!("  2. Run: examiner take --catalog hsk1 --practice");
    println!("  3. Run: examiner take --catalog hsk1 --save");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# examiner configuration

# Length of one tick. Exam time limits are counted in ticks.
tick_millis = 1000
catalog_dir = "./exams"
output_dir = "./exam-results"
default_exam = "hsk1"
"#;

const EXAMPLE_EXAM: &str = r#"[exam]
name = "hsk1"
num_questions = 5
max_wrong = 1
timelimit = 10
hsk_level = 1

[[deck]]
question = "你"
valid_answers = ["ni3", "ni"]
meaning = "you"

[[deck]]
question = "好"
valid_answers = ["hao3", "hao"]
meaning = "good"

[[deck]]
question = "我"
valid_answers = ["wo3", "wo"]
meaning = "I, me"

[[deck]]
question = "是"
valid_answers = ["shi4", "shi"]
meaning = "to be"

[[deck]]
question = "不"
valid_answers = ["bu4", "bu"]
meaning = "not"

[[deck]]
question = "人"
valid_answers = ["ren2", "ren"]
meaning = "person"

[[deck]]
question = "大"
valid_answers = ["da4", "da"]
meaning = "big"

[[deck]]
question = "小"
valid_answers = ["xiao3", "xiao"]
meaning = "small"
"#;
