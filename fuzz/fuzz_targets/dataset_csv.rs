#![no_main]

use comparo::alignment::align;
use comparo::dataset::{CompletionDataset, PromptDataset};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes as both a prompt file and a completion file.
    // Parsing may fail but must never panic, and any accepted pair must align.
    let prompts = PromptDataset::from_reader("prompts", data);
    let completions = CompletionDataset::from_reader("completions", data);

    if let (Ok(prompts), Ok(completions)) = (prompts, completions) {
        let result = align(&prompts, &[completions], 200);
        assert!(result.coverage_stats.matched_inputs <= result.coverage_stats.total_inputs);
        assert!(result.aligned_rows.len() <= 200);
    }
});
