use std::path::Path;

use crate::app::{AppContext, LectorError, Result};
use crate::domain::WordRecord;
use crate::vocabulary::{format_for_lesson, DEFAULT_SAMPLE_SIZE, DEFAULT_UNTRAINED_BATCH};

pub async fn lesson(ctx: &AppContext, source_only: bool) -> Result<()> {
    let lesson = ctx.resolver.resolve().await;

    if source_only {
        println!("{}", lesson.source);
    } else {
        println!("[source: {}]\n", lesson.source);
        println!("{}", lesson.text);
    }
    Ok(())
}

pub async fn brief(ctx: &AppContext) -> Result<()> {
    let brief = ctx.brief().await;
    println!("{}", brief.instructions());
    println!();
    println!("--- opening turn ---");
    println!("{}", brief.opening_turn());
    Ok(())
}

pub fn stats(ctx: &AppContext) -> Result<()> {
    let stats = ctx.vocabulary.stats();
    println!("Total words: {}", stats.total);
    println!("Trained:     {}", stats.trained);
    println!("Untrained:   {}", stats.untrained);
    Ok(())
}

pub fn sample(ctx: &AppContext, count: usize, trained: bool) -> Result<()> {
    print_words(&ctx.vocabulary.sample_random(count, trained));
    Ok(())
}

pub fn untrained(ctx: &AppContext, count: usize) -> Result<()> {
    print_words(&ctx.vocabulary.untrained_words(count));
    Ok(())
}

pub fn find(ctx: &AppContext, word: &str) -> Result<()> {
    match ctx.vocabulary.find_word(word) {
        Some(record) => {
            println!("Word:        {}", record.word);
            println!("Translation: {}", record.translate);
            println!("Transcript:  {}", record.transcript);
            match record.trained_at {
                Some(at) => println!("Trained:     yes ({})", at.format("%Y-%m-%d %H:%M")),
                None => println!("Trained:     no"),
            }
        }
        None => println!("Word not found: {}", word),
    }
    Ok(())
}

pub fn mark(ctx: &AppContext, word: &str) -> Result<()> {
    if ctx.vocabulary.mark_trained(word) {
        println!("Marked as trained: {}", word);
    } else {
        println!("Not updated (missing or already trained): {}", word);
    }
    Ok(())
}

pub fn drill(ctx: &AppContext, word: &str) -> Result<()> {
    match ctx.vocabulary.find_word(word) {
        Some(record) => println!("{}", format_for_lesson(&record)),
        None => println!("Word not found: {}", word),
    }
    Ok(())
}

pub fn import(ctx: &AppContext, path: &Path) -> Result<()> {
    let backend = ctx
        .vocabulary
        .backend()
        .ok_or_else(|| LectorError::Config("vocabulary store is not connected".into()))?;

    let content = std::fs::read_to_string(path)?;
    let words: Vec<WordRecord> = serde_json::from_str(&content)?;

    for word in &words {
        backend.insert_word(word)?;
    }

    println!("Imported {} words into '{}'", words.len(), backend.collection());
    Ok(())
}

/// Walks every vocabulary operation once and prints what came back.
pub fn check(ctx: &AppContext) -> Result<()> {
    let vocab = &ctx.vocabulary;
    let settings = &ctx.config.vocabulary;

    println!("Connection string: {}", if settings.url.is_some() { "SET" } else { "NOT SET" });
    println!("Database:          {}", settings.database);
    println!("Collection:        {}", settings.collection);
    println!("Connected:         {}", vocab.is_connected());

    if !vocab.is_connected() {
        println!("\nVocabulary store unavailable; running degraded.");
        return Ok(());
    }

    println!();
    stats(ctx)?;

    println!("\nRandom {} words:", DEFAULT_SAMPLE_SIZE);
    let sample = vocab.sample_random(DEFAULT_SAMPLE_SIZE, false);
    print_words(&sample);

    println!("\nUntrained words (first {}):", DEFAULT_UNTRAINED_BATCH);
    print_words(&vocab.untrained_words(DEFAULT_UNTRAINED_BATCH));

    if let Some(first) = sample.first() {
        println!("\nFormatted for lesson:");
        println!("  {}", format_for_lesson(first));
    }

    Ok(())
}

fn print_words(words: &[WordRecord]) {
    if words.is_empty() {
        println!("  (none)");
        return;
    }

    for word in words {
        let status = if word.trained { "[TRAINED]" } else { "[NEW]" };
        println!("  {} {} - {}", status, word.word, word.translate);
    }
}
