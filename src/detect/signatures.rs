//! Static per-ecosystem framework signature tables
//!
//! Tables are flat declarative data: framework, then categories, then
//! match patterns. Declaration order matters for primary selection.

use super::{Category, FrameworkSignature};
use crate::ecosystems::Ecosystem;

/// Signature table for an ecosystem.
pub fn table(eco: Ecosystem) -> &'static [FrameworkSignature] {
    match eco {
        Ecosystem::Npm => NPM_SIGNATURES,
        Ecosystem::Pip => PIP_SIGNATURES,
        Ecosystem::Cargo => CARGO_SIGNATURES,
        Ecosystem::Bundler => BUNDLER_SIGNATURES,
    }
}

/// Frameworks eligible to be an ecosystem's primary (UI/web frameworks).
pub fn primary_eligible(eco: Ecosystem) -> &'static [&'static str] {
    match eco {
        Ecosystem::Npm => &["react", "vue", "angular", "svelte", "next", "nuxt"],
        Ecosystem::Pip => &["django", "flask", "fastapi"],
        Ecosystem::Cargo => &["actix", "axum", "rocket"],
        Ecosystem::Bundler => &["rails", "sinatra"],
    }
}

const NPM_SIGNATURES: &[FrameworkSignature] = &[
    FrameworkSignature {
        name: "next",
        categories: &[
            Category {
                name: "core",
                patterns: &["next"],
            },
            Category {
                name: "ecosystem",
                patterns: &["@next/*", "next-*"],
            },
        ],
    },
    FrameworkSignature {
        name: "nuxt",
        categories: &[
            Category {
                name: "core",
                patterns: &["nuxt"],
            },
            Category {
                name: "ecosystem",
                patterns: &["@nuxt/*", "@nuxtjs/*"],
            },
        ],
    },
    FrameworkSignature {
        name: "react",
        categories: &[
            Category {
                name: "core",
                patterns: &["react", "react-dom"],
            },
            Category {
                name: "ecosystem",
                patterns: &[
                    "react-router*",
                    "@tanstack/react-*",
                    "redux",
                    "react-redux",
                    "@reduxjs/toolkit",
                    "zustand",
                ],
            },
            Category {
                name: "testing",
                patterns: &["@testing-library/react*"],
            },
        ],
    },
    FrameworkSignature {
        name: "vue",
        categories: &[
            Category {
                name: "core",
                patterns: &["vue"],
            },
            Category {
                name: "ecosystem",
                patterns: &["vue-router", "vuex", "pinia", "@vue/*"],
            },
        ],
    },
    FrameworkSignature {
        name: "angular",
        categories: &[Category {
            name: "core",
            patterns: &["@angular/*"],
        }],
    },
    FrameworkSignature {
        name: "svelte",
        categories: &[
            Category {
                name: "core",
                patterns: &["svelte"],
            },
            Category {
                name: "ecosystem",
                patterns: &["@sveltejs/*"],
            },
        ],
    },
    FrameworkSignature {
        name: "storybook",
        categories: &[Category {
            name: "tooling",
            patterns: &["storybook", "@storybook/*"],
        }],
    },
    FrameworkSignature {
        name: "typescript",
        categories: &[Category {
            name: "tooling",
            patterns: &["typescript", "ts-node", "tsx"],
        }],
    },
    FrameworkSignature {
        name: "jest",
        categories: &[Category {
            name: "testing",
            patterns: &["jest", "ts-jest", "babel-jest", "@types/jest"],
        }],
    },
    FrameworkSignature {
        name: "vitest",
        categories: &[Category {
            name: "testing",
            patterns: &["vitest", "@vitest/*"],
        }],
    },
    FrameworkSignature {
        name: "eslint",
        categories: &[Category {
            name: "tooling",
            patterns: &["eslint", "eslint-*", "@typescript-eslint/*"],
        }],
    },
    FrameworkSignature {
        name: "vite",
        categories: &[Category {
            name: "build",
            patterns: &["vite", "@vitejs/*"],
        }],
    },
    FrameworkSignature {
        name: "webpack",
        categories: &[Category {
            name: "build",
            patterns: &["webpack", "webpack-*", "*-loader"],
        }],
    },
    FrameworkSignature {
        name: "tailwind",
        categories: &[Category {
            name: "build",
            patterns: &["tailwindcss", "@tailwindcss/*"],
        }],
    },
];

const PIP_SIGNATURES: &[FrameworkSignature] = &[
    FrameworkSignature {
        name: "django",
        categories: &[
            Category {
                name: "core",
                patterns: &["django"],
            },
            Category {
                name: "ecosystem",
                patterns: &["django*", "djangorestframework", "drf-*"],
            },
        ],
    },
    FrameworkSignature {
        name: "flask",
        categories: &[
            Category {
                name: "core",
                patterns: &["flask"],
            },
            Category {
                name: "ecosystem",
                patterns: &["flask-*"],
            },
        ],
    },
    FrameworkSignature {
        name: "fastapi",
        categories: &[
            Category {
                name: "core",
                patterns: &["fastapi"],
            },
            Category {
                name: "ecosystem",
                patterns: &["uvicorn", "starlette", "pydantic", "pydantic-*"],
            },
        ],
    },
    FrameworkSignature {
        name: "sqlalchemy",
        categories: &[Category {
            name: "core",
            patterns: &["sqlalchemy", "alembic"],
        }],
    },
    FrameworkSignature {
        name: "celery",
        categories: &[Category {
            name: "core",
            patterns: &["celery", "kombu"],
        }],
    },
    FrameworkSignature {
        name: "pytest",
        categories: &[Category {
            name: "testing",
            patterns: &["pytest", "pytest-*"],
        }],
    },
];

const CARGO_SIGNATURES: &[FrameworkSignature] = &[
    FrameworkSignature {
        name: "actix",
        categories: &[
            Category {
                name: "core",
                patterns: &["actix-web"],
            },
            Category {
                name: "ecosystem",
                patterns: &["actix-*"],
            },
        ],
    },
    FrameworkSignature {
        name: "axum",
        categories: &[
            Category {
                name: "core",
                patterns: &["axum"],
            },
            Category {
                name: "ecosystem",
                patterns: &["axum-*", "tower", "tower-*", "hyper"],
            },
        ],
    },
    FrameworkSignature {
        name: "rocket",
        categories: &[Category {
            name: "core",
            patterns: &["rocket", "rocket_*"],
        }],
    },
    FrameworkSignature {
        name: "tokio",
        categories: &[Category {
            name: "core",
            patterns: &["tokio", "tokio-*"],
        }],
    },
    FrameworkSignature {
        name: "serde",
        categories: &[Category {
            name: "core",
            patterns: &["serde", "serde_*"],
        }],
    },
];

const BUNDLER_SIGNATURES: &[FrameworkSignature] = &[
    FrameworkSignature {
        name: "rails",
        categories: &[
            Category {
                name: "core",
                patterns: &["rails"],
            },
            Category {
                name: "ecosystem",
                patterns: &["action*", "active*", "railties", "turbo-rails", "stimulus-rails"],
            },
        ],
    },
    FrameworkSignature {
        name: "sinatra",
        categories: &[Category {
            name: "core",
            patterns: &["sinatra", "sinatra-*"],
        }],
    },
    FrameworkSignature {
        name: "sidekiq",
        categories: &[Category {
            name: "core",
            patterns: &["sidekiq", "sidekiq-*"],
        }],
    },
    FrameworkSignature {
        name: "rspec",
        categories: &[Category {
            name: "testing",
            patterns: &["rspec", "rspec-*"],
        }],
    },
];
