//! Property tests for the scoring and fusion pipeline.

use proptest::prelude::*;

use crakd::analysis::{engineer_features, quantitative_scores};
use crakd::judge::JudgeVerdict;
use crakd::models::{Developer, Repository};
use crakd::ranking::{fuse, sort_ranking, EnsembleWeights};

fn arb_repository() -> impl Strategy<Value = Repository> {
    ("[a-z][a-z0-9\\-]{0,12}", 0_u64..100_000, 0_u64..20_000).prop_map(
        |(name, stars, forks)| Repository {
            name,
            stargazers_count: stars,
            forks_count: forks,
            description: None,
            language: None,
        },
    )
}

fn arb_developer() -> impl Strategy<Value = Developer> {
    (
        "[a-z][a-z0-9\\-]{0,20}",
        0_u64..1_000_000,
        0_u64..5_000,
        0_u64..10_000,
        prop::collection::vec(arb_repository(), 0..=5),
    )
        .prop_map(|(username, followers, following, public_repos, top)| Developer {
            username,
            name: None,
            bio: None,
            followers,
            following,
            public_repos,
            total_contributions: 0,
            top_repositories: top,
        })
}

fn arb_verdict() -> impl Strategy<Value = JudgeVerdict> {
    prop_oneof![
        (0.0_f64..=100.0).prop_map(|score| JudgeVerdict::Scored {
            score,
            reasoning: "generated".to_string(),
        }),
        Just(JudgeVerdict::Failed {
            reason: "injected".to_string(),
        }),
    ]
}

fn arb_candidates() -> impl Strategy<Value = Vec<(Developer, JudgeVerdict)>> {
    prop::collection::vec((arb_developer(), arb_verdict()), 0..24)
}

fn run_pipeline(
    candidates: &[(Developer, JudgeVerdict)],
) -> Vec<crakd::models::RankedDeveloper> {
    let developers: Vec<Developer> = candidates.iter().map(|(d, _)| d.clone()).collect();
    let verdicts: Vec<JudgeVerdict> = candidates.iter().map(|(_, v)| v.clone()).collect();

    let features = engineer_features(&developers);
    let scores = quantitative_scores(&features);
    let mut ranked = fuse(&developers, &verdicts, &scores, &EnsembleWeights::default()).unwrap();
    sort_ranking(&mut ranked);
    ranked
}

proptest! {
    #[test]
    fn output_length_and_usernames_match_input(candidates in arb_candidates()) {
        let ranked = run_pipeline(&candidates);
        prop_assert_eq!(ranked.len(), candidates.len());

        let mut input: Vec<String> =
            candidates.iter().map(|(d, _)| d.username.clone()).collect();
        let mut output: Vec<String> =
            ranked.iter().map(|d| d.username().to_string()).collect();
        input.sort();
        output.sort();
        prop_assert_eq!(input, output);
    }

    #[test]
    fn ensemble_formula_holds_for_every_entry(candidates in arb_candidates()) {
        let ranked = run_pipeline(&candidates);
        for entry in &ranked {
            let expected = 0.6 * entry.cracked_score + 0.4 * entry.github_score;
            prop_assert!((entry.ensemble_score - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn quantitative_scores_are_bounded_and_anchored(candidates in arb_candidates()) {
        let developers: Vec<Developer> =
            candidates.iter().map(|(d, _)| d.clone()).collect();
        let features = engineer_features(&developers);
        let sums: Vec<f64> = features.iter().map(|f| f.sum()).collect();
        let scores = quantitative_scores(&features);

        for score in &scores {
            prop_assert!(score.is_finite());
            prop_assert!((0.0..=100.0).contains(score));
        }

        if sums.iter().any(|s| *s > 0.0) {
            let max_index = sums
                .iter()
                .enumerate()
                .max_by(|a, b| a.1.total_cmp(b.1))
                .map(|(i, _)| i)
                .unwrap();
            prop_assert!((scores[max_index] - 100.0).abs() < 1e-9);
        } else {
            prop_assert!(scores.iter().all(|s| *s == 0.0));
        }
    }

    #[test]
    fn ranking_is_sorted_descending(candidates in arb_candidates()) {
        let ranked = run_pipeline(&candidates);
        for pair in ranked.windows(2) {
            prop_assert!(pair[0].ensemble_score >= pair[1].ensemble_score);
        }
    }

    #[test]
    fn failed_verdicts_carry_the_sentinel(candidates in arb_candidates()) {
        let ranked = run_pipeline(&candidates);
        for entry in &ranked {
            if !entry.analyzed {
                prop_assert_eq!(entry.cracked_score, 0.0);
                prop_assert_eq!(entry.reasoning.as_str(), "Error analyzing profile.");
            }
        }
    }

    #[test]
    fn equal_scores_keep_input_order(
        usernames in prop::collection::vec("[a-z]{1,8}", 2..12),
        score in 0.0_f64..=100.0,
    ) {
        // Identical profiles and identical verdicts: every ensemble score
        // ties, so the sorted order must equal the input order.
        let candidates: Vec<(Developer, JudgeVerdict)> = usernames
            .iter()
            .map(|name| {
                (
                    Developer {
                        username: name.clone(),
                        name: None,
                        bio: None,
                        followers: 10,
                        following: 0,
                        public_repos: 2,
                        total_contributions: 0,
                        top_repositories: Vec::new(),
                    },
                    JudgeVerdict::Scored {
                        score,
                        reasoning: "same".to_string(),
                    },
                )
            })
            .collect();

        let ranked = run_pipeline(&candidates);
        let order: Vec<&str> = ranked.iter().map(|d| d.username()).collect();
        let expected: Vec<&str> = usernames.iter().map(String::as_str).collect();
        prop_assert_eq!(order, expected);
    }
}
