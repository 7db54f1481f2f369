//! Integration tests for the full polishing pipeline:
//! - Dictionary persistence across store restarts
//! - Corrections, sentence casing, and number conversion end to end
//! - Training mutations flowing into subsequent polish calls
//!
//! Run with: cargo test --test pipeline_integration_test

use transcript_polish::config::PipelineConfig;
use transcript_polish::dictionary::DictionaryStore;
use transcript_polish::pipeline::Pipeline;

fn pipeline_with(samples: &[(&str, &str)]) -> Pipeline {
    let mut store = DictionaryStore::in_memory();
    for (incorrect, correct) in samples {
        store.add_sample(incorrect, correct);
    }
    Pipeline::new(store, PipelineConfig::default())
}

#[test]
fn test_full_pipeline_corrections_and_numbers() {
    let pipeline = pipeline_with(&[("clawed", "Claude")]);
    assert_eq!(
        pipeline.polish("i asked clawed to review twenty five files"),
        "I asked Claude to review 25 files"
    );
}

#[test]
fn test_numbers_run_after_corrections() {
    // The dictionary maps a phrase onto number words; the number stage
    // must see the corrected text.
    let pipeline = pipeline_with(&[("a couple dozen", "twenty four")]);
    assert_eq!(
        pipeline.polish("bring a couple dozen eggs"),
        "Bring 24 eggs"
    );
}

#[test]
fn test_sentence_casing_across_sentences() {
    let pipeline = pipeline_with(&[]);
    assert_eq!(
        pipeline.polish("first sentence here. second one follows. third too."),
        "First sentence here. Second one follows. Third too."
    );
}

#[test]
fn test_spoken_numbers_end_to_end() {
    let pipeline = pipeline_with(&[]);
    assert_eq!(
        pipeline.polish("the invoice was two hundred and sixty five dollars"),
        "The invoice was 265 dollars"
    );
    assert_eq!(pipeline.polish("it scored four point five stars"), "It scored 4.5 stars");
    assert_eq!(pipeline.polish("pick one of the seventy-five options"), "Pick one of the 75 options");
}

#[test]
fn test_training_then_polishing() {
    let mut pipeline = pipeline_with(&[]);
    assert_eq!(
        pipeline.polish("deploy it with doctor compose"),
        "Deploy it with doctor compose"
    );

    pipeline
        .engine_mut()
        .dictionary_mut()
        .add_sample("Doctor Compose!", "docker compose");
    assert_eq!(
        pipeline.polish("deploy it with doctor compose"),
        "Deploy it with docker compose"
    );
}

#[test]
fn test_dictionary_survives_restart() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("dictionary.json");

    let mut store = DictionaryStore::open(&path);
    store.load();
    store.add_sample("supa base", "Supabase");
    drop(store);

    let mut reloaded = DictionaryStore::open(&path);
    reloaded.load();
    assert_eq!(reloaded.len(), 1);

    let pipeline = Pipeline::new(reloaded, PipelineConfig::default());
    assert_eq!(
        pipeline.polish("we store it in supa base"),
        "We store it in Supabase"
    );
}

#[test]
fn test_repeated_phrase_replaced_everywhere() {
    let pipeline = pipeline_with(&[("clawed", "Claude")]);
    assert_eq!(
        pipeline.polish("clawed here. clawed there. clawed everywhere."),
        "Claude here. Claude there. Claude everywhere."
    );
}

#[test]
fn test_builtin_rules_active_in_pipeline() {
    let pipeline = pipeline_with(&[]);
    assert_eq!(
        pipeline.polish("push the fix to get hub"),
        "Push the fix to GitHub"
    );
    assert_eq!(
        pipeline.polish("the clawed model handled it"),
        "The Claude model handled it"
    );
}

#[test]
fn test_empty_and_whitespace_input() {
    let pipeline = pipeline_with(&[("clawed", "Claude")]);
    assert_eq!(pipeline.polish(""), "");
    assert_eq!(pipeline.polish("   "), "");
}
