mod help;
mod patch_apply;
mod patch_create;
mod patch_list;
