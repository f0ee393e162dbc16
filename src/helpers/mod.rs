pub(crate) mod json;

pub(crate) use json::JsonResponse;
