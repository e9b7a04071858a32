use pretty_assertions::assert_eq;

use super::*;

/// A nested chain shaped like the values the codecs walk.
enum Chain {
    Link(Box<Chain>),
    End,
}

fn build(depth: usize) -> Chain {
    let mut chain = Chain::End;
    for _ in 0..depth {
        chain = Chain::Link(Box::new(chain));
    }
    chain
}

fn depth_of(chain: &Chain) -> usize {
    ensure_sufficient_stack(|| match chain {
        Chain::Link(next) => depth_of(next) + 1,
        Chain::End => 0,
    })
}

#[test]
fn shallow_chain() {
    assert_eq!(depth_of(&build(3)), 3);
}

#[test]
fn deep_chain_does_not_overflow() {
    let chain = build(200_000);
    assert_eq!(depth_of(&chain), 200_000);
    // Iterative drop; the default recursive drop would overflow here.
    let mut cur = chain;
    while let Chain::Link(next) = cur {
        cur = *next;
    }
}

#[test]
fn passes_through_results() {
    let result: Result<u8, &str> = ensure_sufficient_stack(|| Err("stop"));
    assert_eq!(result, Err("stop"));
}
